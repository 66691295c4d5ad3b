use actix_identity::Identity;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::SERVICE_ACCESS_ROLE;
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, ensure_role, render_template};
use crate::services::dashboard as dashboard_service;

#[get("/")]
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

    let metrics = match dashboard_service::load_metrics(repo.get_ref(), &user) {
        Ok(metrics) => metrics,
        Err(err) => {
            log::error!("Failed to load dashboard metrics: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "dashboard",
        &server_config.auth_service_url,
    );
    context.insert("metrics", &metrics);

    render_template(&tera, "main/dashboard.html", &context)
}

#[get("/logout")]
pub async fn logout(
    identity: Option<Identity>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    crate::routes::redirect(&server_config.auth_service_url)
}

#[get("/na")]
pub async fn not_assigned(
    user: AuthenticatedUser,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = base_context(
        &flash_messages,
        &user,
        "not_assigned",
        &server_config.auth_service_url,
    );

    render_template(&tera, "main/not_assigned.html", &context)
}
