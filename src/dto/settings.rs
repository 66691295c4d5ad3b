use serde::Serialize;

use crate::domain::settings::AiSettings;
use crate::storage::StoredFile;

/// Settings page view, with the stored API key masked.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsPage {
    pub agent_name: String,
    pub system_prompt: String,
    pub ai_model: String,
    pub api_key_masked: Option<String>,
    pub webhook_url: Option<String>,
    pub files: Vec<FileRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileRow {
    pub name: String,
    pub size: String,
}

impl From<&StoredFile> for FileRow {
    fn from(file: &StoredFile) -> Self {
        Self {
            name: file.name.clone(),
            size: format_size(file.size),
        }
    }
}

impl SettingsPage {
    pub fn new(settings: &AiSettings, files: &[StoredFile]) -> Self {
        Self {
            agent_name: settings.agent_name.clone(),
            system_prompt: settings.system_prompt.clone(),
            ai_model: settings.ai_model.clone(),
            api_key_masked: settings.masked_api_key(),
            webhook_url: settings.webhook_url.clone(),
            files: files.iter().map(FileRow::from).collect(),
        }
    }
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
