//! Domain entities for the commercial side: plans, coupons and affiliates.

use chrono::NaiveDateTime;
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};

/// A subscription plan offered by the platform.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Plan {
    pub id: i32,
    pub name: String,
    pub price_cents: i32,
    /// Maximum number of simultaneous chats the plan allows.
    pub max_chats: i32,
    /// Plan code registered at the payment provider.
    pub provider_plan_code: String,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewPlan {
    pub name: String,
    pub price_cents: i32,
    pub max_chats: i32,
    pub provider_plan_code: String,
}

impl NewPlan {
    #[must_use]
    pub fn new(name: String, price_cents: i32, max_chats: i32, provider_plan_code: String) -> Self {
        Self {
            name: name.trim().to_string(),
            price_cents: price_cents.max(0),
            max_chats: max_chats.max(0),
            provider_plan_code: provider_plan_code.trim().to_string(),
        }
    }
}

/// A discount coupon, optionally credited to an affiliate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Coupon {
    pub id: i32,
    pub code: String,
    pub discount_percent: i32,
    pub affiliate_id: Option<i32>,
    pub active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCoupon {
    pub code: String,
    pub discount_percent: i32,
    pub affiliate_id: Option<i32>,
}

impl NewCoupon {
    /// Creates a coupon with a freshly generated code.
    #[must_use]
    pub fn generate(discount_percent: i32, affiliate_id: Option<i32>) -> Self {
        Self {
            code: generate_coupon_code(),
            discount_percent: discount_percent.clamp(1, 100),
            affiliate_id,
        }
    }
}

/// Generates an 8-character upper-case alphanumeric coupon code.
pub fn generate_coupon_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect()
}

/// A partner credited for referred subscriptions.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Affiliate {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub commission_percent: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewAffiliate {
    pub name: String,
    pub email: String,
    pub commission_percent: i32,
}

impl NewAffiliate {
    #[must_use]
    pub fn new(name: String, email: String, commission_percent: i32) -> Self {
        Self {
            name: name.trim().to_string(),
            email,
            commission_percent: commission_percent.clamp(0, 100),
        }
    }
}
