use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Per-company configuration of the WhatsApp AI agent.
///
/// One row per company; saved via upsert. The `api_key` is the company secret
/// for the AI provider and is never rendered back in full.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct AiSettings {
    pub company_id: i32,
    pub agent_name: String,
    pub system_prompt: String,
    pub ai_model: String,
    pub api_key: Option<String>,
    pub webhook_url: Option<String>,
    pub updated_at: NaiveDateTime,
}

impl AiSettings {
    /// Masked form of the API key for display, keeping the last 4 characters.
    pub fn masked_api_key(&self) -> Option<String> {
        self.api_key.as_deref().map(|key| {
            let tail: String = key
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("****{tail}")
        })
    }
}

/// Payload for creating or replacing a company's AI settings.
#[derive(Clone, Debug, Deserialize)]
pub struct UpdateAiSettings {
    pub agent_name: String,
    pub system_prompt: String,
    pub ai_model: String,
    /// `None` keeps the stored key untouched.
    pub api_key: Option<String>,
    pub webhook_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_is_masked_for_display() {
        let settings = AiSettings {
            api_key: Some("sk-1234567890abcd".to_string()),
            ..AiSettings::default()
        };
        assert_eq!(settings.masked_api_key().as_deref(), Some("****abcd"));
        assert_eq!(AiSettings::default().masked_api_key(), None);
    }
}
