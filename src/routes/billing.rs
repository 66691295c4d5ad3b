use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::billing::BillingClient;
use crate::dto::billing::PlanRow;
use crate::forms::billing::{AddAffiliateForm, AddCouponForm, SavePlanForm, SubscribeForm};
use crate::models::auth::AuthenticatedUser;
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, PlanReader};
use crate::routes::{base_context, ensure_role, redirect, render_template};
use crate::services::ServiceError;
use crate::services::billing as billing_service;
use crate::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};

#[get("/billing")]
pub async fn index(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    api: web::Data<BillingClient>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    let overview =
        match billing_service::billing_overview(repo.get_ref(), api.get_ref(), &user).await {
            Ok(overview) => overview,
            Err(err) => {
                log::error!("Failed to load billing overview: {err}");
                return HttpResponse::InternalServerError().finish();
            }
        };

    let plans = match repo.list_plans() {
        Ok(plans) => plans.iter().map(PlanRow::from).collect::<Vec<_>>(),
        Err(err) => {
            log::error!("Failed to list plans: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "billing",
        &server_config.auth_service_url,
    );
    context.insert("overview", &overview);
    context.insert("plans", &plans);

    render_template(&tera, "billing/index.html", &context)
}

#[post("/billing/subscribe")]
pub async fn subscribe(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    api: web::Data<BillingClient>,
    web::Form(form): web::Form<SubscribeForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, Some("/na")) {
        return response;
    }

    match billing_service::subscribe(repo.get_ref(), api.get_ref(), &user, &form).await {
        Ok(()) => {
            FlashMessage::success("Assinatura criada.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to subscribe: {err}");
            FlashMessage::error("Erro ao criar a assinatura.").send();
        }
    }
    redirect("/billing")
}

#[get("/admin/plans")]
pub async fn admin_plans(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    let plans = match billing_service::list_plans(repo.get_ref(), &user) {
        Ok(plans) => plans,
        Err(err) => {
            log::error!("Failed to list plans: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "admin_plans",
        &server_config.auth_service_url,
    );
    context.insert("plans", &plans);

    render_template(&tera, "admin/plans.html", &context)
}

#[post("/admin/plans/save")]
pub async fn save_plan(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SavePlanForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match billing_service::save_plan(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Plano salvo.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to save plan: {err}");
            FlashMessage::error("Erro ao salvar o plano.").send();
        }
    }
    redirect("/admin/plans")
}

#[post("/admin/plans/{plan_id}/delete")]
pub async fn delete_plan(
    plan_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match billing_service::delete_plan(repo.get_ref(), &user, plan_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Plano removido.").send();
        }
        Err(err) => {
            log::error!("Failed to delete plan: {err}");
            FlashMessage::error("Erro ao remover o plano.").send();
        }
    }
    redirect("/admin/plans")
}

#[get("/admin/coupons")]
pub async fn admin_coupons(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    let coupons = match billing_service::list_coupons(repo.get_ref(), &user) {
        Ok(coupons) => coupons,
        Err(err) => {
            log::error!("Failed to list coupons: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "admin_coupons",
        &server_config.auth_service_url,
    );
    context.insert("coupons", &coupons);

    render_template(&tera, "admin/coupons.html", &context)
}

#[post("/admin/coupons/add")]
pub async fn add_coupon(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCouponForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match billing_service::add_coupon(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Cupom criado.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add coupon: {err}");
            FlashMessage::error("Erro ao criar o cupom.").send();
        }
    }
    redirect("/admin/coupons")
}

#[post("/admin/coupons/{coupon_id}/deactivate")]
pub async fn deactivate_coupon(
    coupon_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match billing_service::deactivate_coupon(repo.get_ref(), &user, coupon_id.into_inner()) {
        Ok(()) => {
            FlashMessage::success("Cupom desativado.").send();
        }
        Err(err) => {
            log::error!("Failed to deactivate coupon: {err}");
            FlashMessage::error("Erro ao desativar o cupom.").send();
        }
    }
    redirect("/admin/coupons")
}

#[get("/admin/affiliates")]
pub async fn admin_affiliates(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    let affiliates = match billing_service::list_affiliates(repo.get_ref(), &user) {
        Ok(affiliates) => affiliates,
        Err(err) => {
            log::error!("Failed to list affiliates: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(
        &flash_messages,
        &user,
        "admin_affiliates",
        &server_config.auth_service_url,
    );
    context.insert("affiliates", &affiliates);

    render_template(&tera, "admin/affiliates.html", &context)
}

#[post("/admin/affiliates/add")]
pub async fn add_affiliate(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddAffiliateForm>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ADMIN_ROLE, Some("/na")) {
        return response;
    }

    match billing_service::add_affiliate(repo.get_ref(), &user, &form) {
        Ok(()) => {
            FlashMessage::success("Afiliado cadastrado.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to add affiliate: {err}");
            FlashMessage::error("Erro ao cadastrar o afiliado.").send();
        }
    }
    redirect("/admin/affiliates")
}
