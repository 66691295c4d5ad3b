use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::SERVICE_ACCESS_ROLE;
use crate::dto::clients::ClientsQuery;
use crate::forms::clients::{AddClientForm, SaveClientForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, ensure_role, redirect, render_template};
use crate::services::ServiceError;
use crate::services::clients as clients_service;

#[get("/clients")]
pub async fn index(
    query: web::Query<ClientsQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let data = match clients_service::load_clients_page(repo.get_ref(), &user, query.into_inner())
    {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to load clients: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "clients",
        &server_config.auth_service_url,
    );
    context.insert("clients", &data.clients);
    context.insert("total", &data.total);
    context.insert("search_query", &data.search_query);

    render_template(&tera, "clients/index.html", &context)
}

#[post("/clients/add")]
pub async fn add_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddClientForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match clients_service::add_client(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Cliente adicionado.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add client: {err}");
            FlashMessage::error("Erro ao adicionar o cliente.").send();
        }
    }
    redirect("/clients")
}

#[post("/clients/save")]
pub async fn save_client(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveClientForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match clients_service::update_client(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Cliente atualizado.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to update client: {err}");
            FlashMessage::error("Erro ao atualizar o cliente.").send();
        }
    }
    redirect("/clients")
}

#[post("/clients/{client_id}/delete")]
pub async fn delete_client(
    client_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match clients_service::delete_client(repo.get_ref(), &user, client_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Cliente removido.").send();
        }
        Err(err) => {
            log::error!("Failed to delete client: {err}");
            FlashMessage::error("Erro ao remover o cliente.").send();
        }
    }
    redirect("/clients")
}
