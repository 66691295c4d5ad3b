use serde::Deserialize;
use validator::Validate;

use crate::domain::product::{NewProduct, UpdateProduct};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for adding a catalog product.
pub struct AddProductForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price_cents: i32,
}

impl AddProductForm {
    pub fn to_new_product(&self, company_id: i32) -> Result<NewProduct, FormError> {
        self.validate()?;
        Ok(NewProduct::new(
            company_id,
            self.name.clone(),
            self.description.clone(),
            self.price_cents,
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating a catalog product.
pub struct SaveProductForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price_cents: i32,
    #[serde(default)]
    pub active: bool,
}

impl SaveProductForm {
    pub fn to_updates(&self) -> Result<UpdateProduct, FormError> {
        self.validate()?;
        Ok(UpdateProduct::new(
            self.name.clone(),
            self.description.clone(),
            self.price_cents,
            self.active,
        ))
    }
}
