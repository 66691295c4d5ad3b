//! SSE endpoints streaming live view renders.

use actix_web::{HttpResponse, Responder, get, web};
use tera::Tera;

use crate::SERVICE_ACCESS_ROLE;
use crate::live::ChangeFeed;
use crate::live::sse::LiveViewStream;
use crate::live::views::{ChatsBoardView, ClientsView, DashboardView, ProductsView, SettingsView};
use crate::models::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::ensure_role;
use crate::storage::FileStore;

fn sse_response(
    stream: impl futures_util::Stream<Item = Result<web::Bytes, actix_web::Error>> + 'static,
) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(stream)
}

#[get("/live/{view}")]
pub async fn live_view(
    view: web::Path<String>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    feed: web::Data<ChangeFeed>,
    store: web::Data<FileStore>,
    tera: web::Data<Tera>,
) -> impl Responder {
    if let Err(response) = ensure_role(&user, SERVICE_ACCESS_ROLE, None) {
        return response;
    }

    let repo = repo.get_ref().clone();
    let feed = feed.get_ref().clone();
    let tera = tera.into_inner();
    let company_id = user.company_id;

    match view.as_str() {
        "dashboard" => {
            let source = DashboardView::new(repo, tera);
            sse_response(LiveViewStream::start(source, feed, company_id).await)
        }
        "chats" => {
            let source = ChatsBoardView::new(repo, tera);
            sse_response(LiveViewStream::start(source, feed, company_id).await)
        }
        "clients" => {
            let source = ClientsView::new(repo, tera);
            sse_response(LiveViewStream::start(source, feed, company_id).await)
        }
        "products" => {
            let source = ProductsView::new(repo, tera);
            sse_response(LiveViewStream::start(source, feed, company_id).await)
        }
        "settings" => {
            let source = SettingsView::new(repo, store.get_ref().clone(), tera);
            sse_response(LiveViewStream::start(source, feed, company_id).await)
        }
        _ => HttpResponse::NotFound().finish(),
    }
}
