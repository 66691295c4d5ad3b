use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::settings::UpdateAiSettings;
use crate::domain::types::{SafeText, WebhookUrl};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
/// Form data for saving the AI agent settings.
pub struct SaveSettingsForm {
    #[validate(length(min = 1))]
    pub agent_name: String,
    #[validate(length(min = 1))]
    pub system_prompt: String,
    #[validate(length(min = 1))]
    pub ai_model: String,
    /// Empty means keep the stored key.
    pub api_key: Option<String>,
    pub webhook_url: Option<String>,
}

impl SaveSettingsForm {
    /// Validates the form, strips markup from free text and checks the
    /// webhook URL when one is given.
    pub fn to_updates(&self) -> Result<UpdateAiSettings, FormError> {
        self.validate()?;

        let agent_name = SafeText::non_empty(&self.agent_name)?;
        let system_prompt = SafeText::non_empty(&self.system_prompt)?;

        let webhook_url = match self.webhook_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Some(WebhookUrl::new(url)?.into_inner()),
            _ => None,
        };

        Ok(UpdateAiSettings {
            agent_name: agent_name.into_inner(),
            system_prompt: system_prompt.into_inner(),
            ai_model: self.ai_model.trim().to_string(),
            api_key: self
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(ToString::to_string),
            webhook_url,
        })
    }
}

#[derive(MultipartForm)]
/// Knowledge-base document upload.
pub struct UploadFileForm {
    #[multipart(limit = "10MB")]
    pub file: TempFile,
}
