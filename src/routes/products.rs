use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::SERVICE_ACCESS_ROLE;
use crate::forms::products::{AddProductForm, SaveProductForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, ensure_role, redirect, render_template};
use crate::services::ServiceError;
use crate::services::products as products_service;

#[get("/products")]
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

    let products = match products_service::list_products(repo.get_ref(), &user) {
        Ok(products) => products,
        Err(err) => {
            log::error!("Failed to load products: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "products",
        &server_config.auth_service_url,
    );
    context.insert("products", &products);

    render_template(&tera, "products/index.html", &context)
}

#[post("/products/add")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddProductForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match products_service::add_product(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Produto adicionado.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add product: {err}");
            FlashMessage::error("Erro ao adicionar o produto.").send();
        }
    }
    redirect("/products")
}

#[post("/products/save")]
pub async fn save_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SaveProductForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match products_service::update_product(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Produto atualizado.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to update product: {err}");
            FlashMessage::error("Erro ao atualizar o produto.").send();
        }
    }
    redirect("/products")
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match products_service::delete_product(repo.get_ref(), &user, product_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Produto removido.").send();
        }
        Err(err) => {
            log::error!("Failed to delete product: {err}");
            FlashMessage::error("Erro ao remover o produto.").send();
        }
    }
    redirect("/products")
}
