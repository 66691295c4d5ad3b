use serde::Deserialize;

use crate::domain::chat::ChatStage;

#[derive(Deserialize)]
/// Form data for dragging a chat card into another column.
pub struct MoveChatForm {
    pub id: i32,
    pub stage: String,
}

impl MoveChatForm {
    pub fn stage(&self) -> ChatStage {
        ChatStage::from(self.stage.as_str())
    }
}
