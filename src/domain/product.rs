use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A catalog item the AI agent can offer during a conversation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Product {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Price in cents to avoid floating point money.
    pub price_cents: i32,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    pub company_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i32,
    pub active: bool,
}

impl NewProduct {
    #[must_use]
    pub fn new(
        company_id: i32,
        name: String,
        description: Option<String>,
        price_cents: i32,
    ) -> Self {
        Self {
            company_id,
            name: name.trim().to_string(),
            description: description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            price_cents: price_cents.max(0),
            active: true,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i32,
    pub active: bool,
}

impl UpdateProduct {
    #[must_use]
    pub fn new(
        name: String,
        description: Option<String>,
        price_cents: i32,
        active: bool,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            description: description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            price_cents: price_cents.max(0),
            active,
        }
    }
}
