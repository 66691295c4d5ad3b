use serde::Serialize;

use crate::domain::product::Product;

#[derive(Debug, Clone, Serialize)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub active: bool,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_price_cents(product.price_cents),
            active: product.active,
        }
    }
}

/// Formats a price in cents as Brazilian reais, e.g. `R$ 149,90`.
pub fn format_price_cents(cents: i32) -> String {
    format!("R$ {},{:02}", cents / 100, cents % 100)
}
