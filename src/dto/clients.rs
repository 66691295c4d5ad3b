use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::pagination::Paginated;

/// Query string accepted by the clients page.
#[derive(Debug, Deserialize)]
pub struct ClientsQuery {
    pub page: Option<usize>,
    pub search: Option<String>,
}

/// Data backing the clients list page.
#[derive(Serialize)]
pub struct ClientsPageData {
    pub clients: Paginated<ClientRow>,
    pub total: usize,
    pub search_query: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientRow {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: String,
}

impl From<&Client> for ClientRow {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            phone: client.phone.clone(),
            email: client.email.clone(),
            notes: client.notes.clone(),
            created_at: client.created_at.format("%d/%m/%Y").to_string(),
        }
    }
}
