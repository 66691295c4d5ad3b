use actix_cors::Cors;
use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware as actix_middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::billing::BillingClient;
use crate::db::establish_connection_pool;
use crate::live::ChangeFeed;
use crate::middleware::RedirectUnauthorized;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::billing::{
    add_affiliate, add_coupon, admin_affiliates, admin_coupons, admin_plans, deactivate_coupon,
    delete_plan, save_plan, subscribe,
};
use crate::routes::chats::{delete_chat, move_chat};
use crate::routes::clients::{add_client, delete_client, save_client};
use crate::routes::dashboard::{index, logout, not_assigned};
use crate::routes::live::live_view;
use crate::routes::products::{add_product, delete_product, save_product};
use crate::routes::settings::{delete_file, save_settings, upload_file};
use crate::storage::FileStore;

pub mod billing;
pub mod db;
pub mod domain;
pub mod dto;
pub mod forms;
pub mod live;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod storage;

pub const SERVICE_ACCESS_ROLE: &str = "oreh";
pub const SERVICE_ADMIN_ROLE: &str = "oreh_admin";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let feed = ChangeFeed::default();
    let repo = DieselRepository::new(pool, feed.clone());
    let store = FileStore::new(&server_config.storage_dir);
    let billing_client = BillingClient::new(
        &server_config.billing_proxy_url,
        &server_config.billing_proxy_key,
    );

    // Keys and stores for identity, sessions, and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(actix_middleware::Compress::default())
            .wrap(actix_middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(index)
                    .service(not_assigned)
                    .service(logout)
                    .service(crate::routes::chats::index)
                    .service(move_chat)
                    .service(delete_chat)
                    .service(crate::routes::clients::index)
                    .service(add_client)
                    .service(save_client)
                    .service(delete_client)
                    .service(crate::routes::products::index)
                    .service(add_product)
                    .service(save_product)
                    .service(delete_product)
                    .service(crate::routes::settings::index)
                    .service(save_settings)
                    .service(upload_file)
                    .service(delete_file)
                    .service(crate::routes::billing::index)
                    .service(subscribe)
                    .service(admin_plans)
                    .service(save_plan)
                    .service(delete_plan)
                    .service(admin_coupons)
                    .service(add_coupon)
                    .service(deactivate_coupon)
                    .service(admin_affiliates)
                    .service(add_affiliate)
                    .service(live_view),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(feed.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(billing_client.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
