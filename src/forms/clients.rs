use serde::Deserialize;
use validator::Validate;

use crate::domain::client::{NewClient, UpdateClient};
use crate::domain::types::WhatsAppPhone;
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for registering a new client.
pub struct AddClientForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl AddClientForm {
    /// Validates the form and builds the insert payload, normalizing the
    /// phone number to E.164.
    pub fn to_new_client(&self, company_id: i32) -> Result<NewClient, FormError> {
        self.validate()?;
        let phone = WhatsAppPhone::new(&self.phone)?;
        Ok(NewClient::new(
            company_id,
            self.name.clone(),
            phone.into_inner(),
            self.email.clone(),
            self.notes.clone(),
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing client.
pub struct SaveClientForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub phone: String,
    #[validate(email)]
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl SaveClientForm {
    pub fn to_updates(&self) -> Result<UpdateClient, FormError> {
        self.validate()?;
        let phone = WhatsAppPhone::new(&self.phone)?;
        Ok(UpdateClient::new(
            self.name.clone(),
            phone.into_inner(),
            self.email.clone(),
            self.notes.clone(),
        ))
    }
}
