//! Diesel models for plans, coupons and affiliates.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::billing::{
    Affiliate as DomainAffiliate, Coupon as DomainCoupon, NewAffiliate as DomainNewAffiliate,
    NewCoupon as DomainNewCoupon, NewPlan as DomainNewPlan, Plan as DomainPlan,
};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::plans)]
/// Diesel model for [`crate::domain::billing::Plan`].
pub struct Plan {
    pub id: i32,
    pub name: String,
    pub price_cents: i32,
    pub max_chats: i32,
    pub provider_plan_code: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::plans)]
/// Insertable and updatable form of [`Plan`].
pub struct NewPlan<'a> {
    pub name: &'a str,
    pub price_cents: i32,
    pub max_chats: i32,
    pub provider_plan_code: &'a str,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::coupons)]
/// Diesel model for [`crate::domain::billing::Coupon`].
pub struct Coupon {
    pub id: i32,
    pub code: String,
    pub discount_percent: i32,
    pub affiliate_id: Option<i32>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::coupons)]
/// Insertable form of [`Coupon`].
pub struct NewCoupon<'a> {
    pub code: &'a str,
    pub discount_percent: i32,
    pub affiliate_id: Option<i32>,
    pub active: bool,
}

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::affiliates)]
/// Diesel model for [`crate::domain::billing::Affiliate`].
pub struct Affiliate {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub commission_percent: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::affiliates)]
/// Insertable form of [`Affiliate`].
pub struct NewAffiliate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub commission_percent: i32,
}

impl From<Plan> for DomainPlan {
    fn from(plan: Plan) -> Self {
        Self {
            id: plan.id,
            name: plan.name,
            price_cents: plan.price_cents,
            max_chats: plan.max_chats,
            provider_plan_code: plan.provider_plan_code,
            created_at: plan.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewPlan> for NewPlan<'a> {
    fn from(plan: &'a DomainNewPlan) -> Self {
        Self {
            name: plan.name.as_str(),
            price_cents: plan.price_cents,
            max_chats: plan.max_chats,
            provider_plan_code: plan.provider_plan_code.as_str(),
        }
    }
}

impl From<Coupon> for DomainCoupon {
    fn from(coupon: Coupon) -> Self {
        Self {
            id: coupon.id,
            code: coupon.code,
            discount_percent: coupon.discount_percent,
            affiliate_id: coupon.affiliate_id,
            active: coupon.active,
            created_at: coupon.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewCoupon> for NewCoupon<'a> {
    fn from(coupon: &'a DomainNewCoupon) -> Self {
        Self {
            code: coupon.code.as_str(),
            discount_percent: coupon.discount_percent,
            affiliate_id: coupon.affiliate_id,
            active: true,
        }
    }
}

impl From<Affiliate> for DomainAffiliate {
    fn from(affiliate: Affiliate) -> Self {
        Self {
            id: affiliate.id,
            name: affiliate.name,
            email: affiliate.email,
            commission_percent: affiliate.commission_percent,
            created_at: affiliate.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewAffiliate> for NewAffiliate<'a> {
    fn from(affiliate: &'a DomainNewAffiliate) -> Self {
        Self {
            name: affiliate.name.as_str(),
            email: affiliate.email.as_str(),
            commission_percent: affiliate.commission_percent,
        }
    }
}
