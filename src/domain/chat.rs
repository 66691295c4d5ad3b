use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Funnel stage of a WhatsApp conversation, shown as the kanban column.
///
/// Persisted as text; unknown values map to [`ChatStage::Novo`] so a bad row
/// never breaks the board.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ChatStage {
    Novo,
    Atendimento,
    Finalizado,
}

impl ChatStage {
    /// All stages in kanban column order.
    pub const ALL: [ChatStage; 3] = [
        ChatStage::Novo,
        ChatStage::Atendimento,
        ChatStage::Finalizado,
    ];

    /// Human-readable column title.
    pub fn title(self) -> &'static str {
        match self {
            ChatStage::Novo => "Novo",
            ChatStage::Atendimento => "Atendimento",
            ChatStage::Finalizado => "Finalizado",
        }
    }
}

impl Display for ChatStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatStage::Novo => write!(f, "novo"),
            ChatStage::Atendimento => write!(f, "atendimento"),
            ChatStage::Finalizado => write!(f, "finalizado"),
        }
    }
}

impl From<&str> for ChatStage {
    fn from(s: &str) -> Self {
        match s {
            "atendimento" => ChatStage::Atendimento,
            "finalizado" => ChatStage::Finalizado,
            _ => ChatStage::Novo,
        }
    }
}

impl From<String> for ChatStage {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

/// A WhatsApp conversation between the company's AI agent and a contact.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Chat {
    pub id: i32,
    pub company_id: i32,
    pub contact_name: String,
    pub contact_phone: String,
    /// Last message exchanged, shown on the kanban card.
    pub last_message: Option<String>,
    pub stage: ChatStage,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewChat {
    pub company_id: i32,
    pub contact_name: String,
    pub contact_phone: String,
    pub last_message: Option<String>,
    pub stage: ChatStage,
}

impl NewChat {
    #[must_use]
    pub fn new(
        company_id: i32,
        contact_name: String,
        contact_phone: String,
        last_message: Option<String>,
    ) -> Self {
        Self {
            company_id,
            contact_name: contact_name.trim().to_string(),
            contact_phone,
            last_message: last_message
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            stage: ChatStage::Novo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_round_trips_through_text() {
        for stage in ChatStage::ALL {
            assert_eq!(ChatStage::from(stage.to_string()), stage);
        }
    }

    #[test]
    fn unknown_stage_defaults_to_novo() {
        assert_eq!(ChatStage::from("whatever"), ChatStage::Novo);
    }

    #[test]
    fn new_chat_starts_at_novo() {
        let chat = NewChat::new(1, " Ana ".into(), "+5511987654321".into(), Some("  ".into()));
        assert_eq!(chat.stage, ChatStage::Novo);
        assert_eq!(chat.contact_name, "Ana");
        assert_eq!(chat.last_message, None);
    }
}
