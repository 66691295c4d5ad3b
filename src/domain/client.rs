use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An end customer reachable over WhatsApp.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Client {
    pub id: i32,
    pub company_id: i32,
    pub name: String,
    /// Normalized E.164 WhatsApp number.
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewClient {
    pub company_id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl NewClient {
    #[must_use]
    pub fn new(
        company_id: i32,
        name: String,
        phone: String,
        email: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            company_id,
            name: name.trim().to_string(),
            phone,
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            notes: notes
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct UpdateClient {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl UpdateClient {
    #[must_use]
    pub fn new(
        name: String,
        phone: String,
        email: Option<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            phone,
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            notes: notes
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
