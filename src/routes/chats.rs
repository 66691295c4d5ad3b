use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::SERVICE_ACCESS_ROLE;
use crate::forms::chats::MoveChatForm;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, ensure_role, redirect, render_template};
use crate::services::chats as chats_service;

#[get("/chats")]
pub async fn index(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let board = match chats_service::load_board(repo.get_ref(), &user) {
        Ok(board) => board,
        Err(err) => {
            log::error!("Failed to load kanban board: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "chats",
        &server_config.auth_service_url,
    );
    context.insert("board", &board);

    render_template(&tera, "chats/index.html", &context)
}

#[post("/chats/move")]
pub async fn move_chat(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<MoveChatForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match chats_service::move_chat(repo.get_ref(), &user, &form) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => {
            log::error!("Failed to move chat: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/chats/{chat_id}/delete")]
pub async fn delete_chat(
    chat_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match chats_service::delete_chat(repo.get_ref(), &user, chat_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Conversa removida.").send();
        }
        Err(err) => {
            log::error!("Failed to delete chat: {err}");
            FlashMessage::error("Erro ao remover a conversa.").send();
        }
    }
    redirect("/chats")
}
