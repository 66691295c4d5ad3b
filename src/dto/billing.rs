use serde::Serialize;

use crate::domain::billing::{Affiliate, Coupon, Plan};

#[derive(Debug, Clone, Serialize)]
pub struct PlanRow {
    pub id: i32,
    pub name: String,
    pub provider_plan_code: String,
    pub price: String,
    pub max_chats: i32,
}

impl From<&Plan> for PlanRow {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id,
            name: plan.name.clone(),
            provider_plan_code: plan.provider_plan_code.clone(),
            price: super::products::format_price_cents(plan.price_cents),
            max_chats: plan.max_chats,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CouponRow {
    pub id: i32,
    pub code: String,
    pub discount_percent: i32,
    pub affiliate_name: Option<String>,
    pub active: bool,
}

impl CouponRow {
    pub fn new(coupon: &Coupon, affiliate_name: Option<String>) -> Self {
        Self {
            id: coupon.id,
            code: coupon.code.clone(),
            discount_percent: coupon.discount_percent,
            affiliate_name,
            active: coupon.active,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AffiliateRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub commission_percent: i32,
    pub coupon_codes: Vec<String>,
}

impl AffiliateRow {
    pub fn new(affiliate: &Affiliate, coupons: &[Coupon]) -> Self {
        Self {
            id: affiliate.id,
            name: affiliate.name.clone(),
            email: affiliate.email.clone(),
            commission_percent: affiliate.commission_percent,
            coupon_codes: coupons.iter().map(|c| c.code.clone()).collect(),
        }
    }
}

/// Billing tab of the company settings, assembled from the payment proxy.
#[derive(Debug, Clone, Serialize)]
pub struct BillingOverview {
    pub plan_name: Option<String>,
    pub subscription_status: Option<String>,
    pub invoice_url: Option<String>,
}
