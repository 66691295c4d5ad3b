//! Repository implementation for WhatsApp chats.

use diesel::prelude::*;

use crate::domain::chat::{Chat, ChatStage, NewChat};
use crate::domain::types::{ChatId, CompanyId};
use crate::live::{ChangeOp, EntityKind};
use crate::models::chat::{Chat as DbChat, NewChat as DbNewChat};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ChatReader, ChatWriter, DieselRepository};

impl ChatReader for DieselRepository {
    fn get_chat_by_id(
        &self,
        id: ChatId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Chat>> {
        use crate::schema::chats;

        let mut conn = self.conn()?;
        let chat = chats::table
            .find(id.get())
            .filter(chats::company_id.eq(company_id.get()))
            .first::<DbChat>(&mut conn)
            .optional()?;

        Ok(chat.map(Into::into))
    }

    fn list_chats(&self, company_id: CompanyId) -> RepositoryResult<Vec<Chat>> {
        use crate::schema::chats;

        let mut conn = self.conn()?;
        let chats = chats::table
            .filter(chats::company_id.eq(company_id.get()))
            .order(chats::updated_at.desc())
            .load::<DbChat>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(chats)
    }
}

impl ChatWriter for DieselRepository {
    fn create_chat(&self, new_chat: &NewChat) -> RepositoryResult<Chat> {
        use crate::schema::chats;

        let mut conn = self.conn()?;
        let db_new_chat: DbNewChat = new_chat.into();

        let chat: Chat = diesel::insert_into(chats::table)
            .values(&db_new_chat)
            .get_result::<DbChat>(&mut conn)?
            .into();

        if let Ok(company_id) = CompanyId::new(chat.company_id) {
            self.notify(company_id, EntityKind::Chat, ChangeOp::Insert);
        }
        Ok(chat)
    }

    fn set_chat_stage(
        &self,
        id: ChatId,
        company_id: CompanyId,
        stage: ChatStage,
    ) -> RepositoryResult<Chat> {
        use crate::schema::chats;

        let mut conn = self.conn()?;
        let chat: Chat = diesel::update(
            chats::table
                .find(id.get())
                .filter(chats::company_id.eq(company_id.get())),
        )
        .set((
            chats::stage.eq(stage.to_string()),
            chats::updated_at.eq(chrono::Utc::now().naive_utc()),
        ))
        .get_result::<DbChat>(&mut conn)?
        .into();

        self.notify(company_id, EntityKind::Chat, ChangeOp::Update);
        Ok(chat)
    }

    fn delete_chat(&self, id: ChatId, company_id: CompanyId) -> RepositoryResult<()> {
        use crate::schema::chats;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            chats::table
                .find(id.get())
                .filter(chats::company_id.eq(company_id.get())),
        )
        .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.notify(company_id, EntityKind::Chat, ChangeOp::Delete);
        Ok(())
    }
}
