use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tenant of the platform.
///
/// `public_id` is the stable external reference sent to the payment provider;
/// the billing ids are filled in by the subscription flow.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: i32,
    pub public_id: Uuid,
    pub name: String,
    pub plan_id: Option<i32>,
    pub billing_customer_id: Option<String>,
    pub billing_subscription_id: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewCompany {
    pub public_id: Uuid,
    pub name: String,
}

impl NewCompany {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            public_id: Uuid::new_v4(),
            name: name.trim().to_string(),
        }
    }
}

/// Billing identifiers persisted after talking to the payment provider.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateCompanyBilling {
    pub plan_id: Option<i32>,
    pub billing_customer_id: Option<String>,
    pub billing_subscription_id: Option<String>,
}
