use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::chat::{Chat as DomainChat, ChatStage, NewChat as DomainNewChat};

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::chats)]
/// Diesel model for [`crate::domain::chat::Chat`].
pub struct Chat {
    pub id: i32,
    pub company_id: i32,
    pub contact_name: String,
    pub contact_phone: String,
    pub last_message: Option<String>,
    pub stage: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::chats)]
/// Insertable form of [`Chat`].
pub struct NewChat<'a> {
    pub company_id: i32,
    pub contact_name: &'a str,
    pub contact_phone: &'a str,
    pub last_message: Option<&'a str>,
    pub stage: String,
}

impl From<Chat> for DomainChat {
    fn from(chat: Chat) -> Self {
        Self {
            id: chat.id,
            company_id: chat.company_id,
            contact_name: chat.contact_name,
            contact_phone: chat.contact_phone,
            last_message: chat.last_message,
            stage: ChatStage::from(chat.stage),
            created_at: chat.created_at,
            updated_at: chat.updated_at,
        }
    }
}

impl<'a> From<&'a DomainNewChat> for NewChat<'a> {
    fn from(chat: &'a DomainNewChat) -> Self {
        Self {
            company_id: chat.company_id,
            contact_name: chat.contact_name.as_str(),
            contact_phone: chat.contact_phone.as_str(),
            last_message: chat.last_message.as_deref(),
            stage: chat.stage.to_string(),
        }
    }
}
