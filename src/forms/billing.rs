use serde::Deserialize;
use validator::Validate;

use crate::domain::billing::{NewAffiliate, NewCoupon, NewPlan};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for creating or editing a subscription plan.
pub struct SavePlanForm {
    pub id: Option<i32>,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 0))]
    pub price_cents: i32,
    #[validate(range(min = 1))]
    pub max_chats: i32,
    #[validate(length(min = 1))]
    pub provider_plan_code: String,
}

impl SavePlanForm {
    pub fn to_new_plan(&self) -> Result<NewPlan, FormError> {
        self.validate()?;
        Ok(NewPlan::new(
            self.name.clone(),
            self.price_cents,
            self.max_chats,
            self.provider_plan_code.clone(),
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for issuing a coupon; the code itself is generated server-side.
pub struct AddCouponForm {
    #[validate(range(min = 1, max = 100))]
    pub discount_percent: i32,
    pub affiliate_id: Option<i32>,
}

impl AddCouponForm {
    pub fn to_new_coupon(&self) -> Result<NewCoupon, FormError> {
        self.validate()?;
        Ok(NewCoupon::generate(self.discount_percent, self.affiliate_id))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for registering an affiliate partner.
pub struct AddAffiliateForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(range(min = 0, max = 100))]
    pub commission_percent: i32,
}

impl AddAffiliateForm {
    pub fn to_new_affiliate(&self) -> Result<NewAffiliate, FormError> {
        self.validate()?;
        Ok(NewAffiliate::new(
            self.name.clone(),
            self.email.to_lowercase(),
            self.commission_percent,
        ))
    }
}

#[derive(Deserialize)]
/// Form data for subscribing the company to a plan.
pub struct SubscribeForm {
    pub plan_id: i32,
    pub coupon_code: Option<String>,
}
