//! View model of the chats kanban board.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::chat::{Chat, ChatStage};

/// One card on the board.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KanbanCard {
    pub id: i32,
    pub contact_name: String,
    pub contact_phone: String,
    pub last_message: Option<String>,
    pub updated_at: String,
}

impl From<&Chat> for KanbanCard {
    fn from(chat: &Chat) -> Self {
        Self {
            id: chat.id,
            contact_name: chat.contact_name.clone(),
            contact_phone: chat.contact_phone.clone(),
            last_message: chat.last_message.clone(),
            updated_at: chat.updated_at.format("%d/%m %H:%M").to_string(),
        }
    }
}

/// One `temperatura` column with its header count.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KanbanColumn {
    pub stage: ChatStage,
    pub title: &'static str,
    pub count: usize,
    pub cards: Vec<KanbanCard>,
}

/// The full board, one column per stage in funnel order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KanbanBoard {
    pub columns: Vec<KanbanColumn>,
}

impl KanbanBoard {
    /// Distributes chats across stage columns.
    ///
    /// `Finalizado` cards only appear while `updated_at` is still `today`;
    /// older finished conversations leave the board entirely.
    pub fn build(chats: &[Chat], today: NaiveDate) -> Self {
        let columns = ChatStage::ALL
            .iter()
            .map(|&stage| {
                let cards: Vec<KanbanCard> = chats
                    .iter()
                    .filter(|chat| chat.stage == stage)
                    .filter(|chat| stage != ChatStage::Finalizado || chat.updated_at.date() == today)
                    .map(KanbanCard::from)
                    .collect();
                KanbanColumn {
                    stage,
                    title: stage.title(),
                    count: cards.len(),
                    cards,
                }
            })
            .collect();

        Self { columns }
    }

    /// Total number of cards currently on the board.
    pub fn total_cards(&self) -> usize {
        self.columns.iter().map(|column| column.count).sum()
    }
}
