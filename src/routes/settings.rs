use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::SERVICE_ACCESS_ROLE;
use crate::forms::settings::{SaveSettingsForm, UploadFileForm};
use crate::live::ChangeFeed;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, ensure_role, redirect, render_template};
use crate::services::ServiceError;
use crate::services::settings as settings_service;
use crate::storage::FileStore;

#[get("/settings")]
pub async fn index(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    store: web::Data<FileStore>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let page = match settings_service::load_settings_page(repo.get_ref(), &store, &user) {
        Ok(page) => page,
        Err(err) => {
            log::error!("Failed to load settings: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "settings",
        &server_config.auth_service_url,
    );
    context.insert("settings", &page);

    render_template(&tera, "settings/index.html", &context)
}

#[post("/settings/save")]
pub async fn save_settings(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveSettingsForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match settings_service::save_settings(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Configurações salvas.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save settings: {err}");
            FlashMessage::error("Erro ao salvar as configurações.").send();
        }
    }
    redirect("/settings")
}

#[post("/settings/files/upload")]
pub async fn upload_file(
    user: AuthenticatedUser,
    store: web::Data<FileStore>,
    feed: web::Data<ChangeFeed>,
    MultipartForm(form): MultipartForm<UploadFileForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match settings_service::upload_file(&store, &feed, &user, &form) {
        Ok(()) => {
            FlashMessage::success("Arquivo enviado.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to upload file: {err}");
            FlashMessage::error("Erro ao enviar o arquivo.").send();
        }
    }
    redirect("/settings")
}

#[post("/settings/files/{name}/delete")]
pub async fn delete_file(
    name: web::Path<String>,
    user: AuthenticatedUser,
    store: web::Data<FileStore>,
    feed: web::Data<ChangeFeed>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match settings_service::delete_file(&store, &feed, &user, &name) {
        Ok(()) => {
            FlashMessage::success("Arquivo removido.").send();
        }
        Err(err) => {
            log::error!("Failed to delete file: {err}");
            FlashMessage::error("Erro ao remover o arquivo.").send();
        }
    }
    redirect("/settings")
}
