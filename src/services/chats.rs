use chrono::Utc;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::types::{ChatId, CompanyId};
use crate::dto::chats::KanbanBoard;
use crate::forms::chats::MoveChatForm;
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ChatReader, ChatWriter};
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};

/// Loads the kanban board for the user's company.
pub fn load_board<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<KanbanBoard>
where
    R: ChatReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let chats = repo.list_chats(CompanyId::new(user.company_id)?)?;
    Ok(KanbanBoard::build(&chats, Utc::now().date_naive()))
}

/// Moves a chat card into another stage column.
pub fn move_chat<R>(repo: &R, user: &AuthenticatedUser, form: &MoveChatForm) -> ServiceResult<()>
where
    R: ChatWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.set_chat_stage(
        ChatId::new(form.id)?,
        CompanyId::new(user.company_id)?,
        form.stage(),
    )
    .map_err(|err| {
        log::error!("Failed to move chat: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

/// Removes a conversation from the board entirely.
pub fn delete_chat<R>(repo: &R, user: &AuthenticatedUser, chat_id: i32) -> ServiceResult<()>
where
    R: ChatWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_chat(ChatId::new(chat_id)?, CompanyId::new(user.company_id)?)
        .map_err(|err| {
            log::error!("Failed to delete chat: {err}");
            ServiceError::from(err)
        })?;

    Ok(())
}
