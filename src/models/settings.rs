use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::settings::AiSettings as DomainAiSettings;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::company_settings)]
#[diesel(primary_key(company_id))]
/// Diesel model for [`crate::domain::settings::AiSettings`].
pub struct AiSettings {
    pub company_id: i32,
    pub agent_name: String,
    pub system_prompt: String,
    pub ai_model: String,
    pub api_key: Option<String>,
    pub webhook_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::company_settings)]
/// Insertable form of [`AiSettings`], also used as the upsert changeset.
pub struct NewAiSettings<'a> {
    pub company_id: i32,
    pub agent_name: &'a str,
    pub system_prompt: &'a str,
    pub ai_model: &'a str,
    pub api_key: Option<&'a str>,
    pub webhook_url: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl From<AiSettings> for DomainAiSettings {
    fn from(settings: AiSettings) -> Self {
        Self {
            company_id: settings.company_id,
            agent_name: settings.agent_name,
            system_prompt: settings.system_prompt,
            ai_model: settings.ai_model,
            api_key: settings.api_key,
            webhook_url: settings.webhook_url,
            updated_at: settings.updated_at,
        }
    }
}
