//! Concrete view sources behind the SSE endpoints.
//!
//! Each source pairs a repository read with a Tera fragment and produces the
//! full HTML of one page region. The fragments under `templates/live/` are the
//! same ones the full pages include on first load.

use std::sync::Arc;

use chrono::Utc;
use tera::{Context, Tera};

use crate::domain::types::CompanyId;
use crate::dto::chats::KanbanBoard;
use crate::dto::clients::ClientRow;
use crate::dto::products::ProductRow;
use crate::dto::settings::SettingsPage;
use crate::live::EntityKind;
use crate::live::view::ViewSource;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{
    ChatReader, ClientListQuery, ClientReader, MetricsReader, ProductReader, SettingsReader,
};
use crate::services::errors::ServiceResult;
use crate::storage::FileStore;

/// Dashboard metric cards. Refreshes on any change that can move a counter.
pub struct DashboardView<R> {
    repo: R,
    tera: Arc<Tera>,
}

impl<R> DashboardView<R> {
    pub fn new(repo: R, tera: Arc<Tera>) -> Self {
        Self { repo, tera }
    }
}

impl<R> ViewSource for DashboardView<R>
where
    R: MetricsReader + Send + Sync + 'static,
{
    type Output = String;

    fn entities(&self) -> &'static [EntityKind] {
        &[EntityKind::Chat, EntityKind::Client, EntityKind::Product]
    }

    fn fetch(&self, company_id: i32) -> ServiceResult<String> {
        let metrics = self.repo.dashboard_metrics(CompanyId::new(company_id)?)?;
        let mut context = Context::new();
        context.insert("metrics", &metrics);
        Ok(self.tera.render("live/dashboard.html", &context)?)
    }
}

/// The chats kanban board.
pub struct ChatsBoardView<R> {
    repo: R,
    tera: Arc<Tera>,
}

impl<R> ChatsBoardView<R> {
    pub fn new(repo: R, tera: Arc<Tera>) -> Self {
        Self { repo, tera }
    }
}

impl<R> ViewSource for ChatsBoardView<R>
where
    R: ChatReader + Send + Sync + 'static,
{
    type Output = String;

    fn entities(&self) -> &'static [EntityKind] {
        &[EntityKind::Chat]
    }

    fn fetch(&self, company_id: i32) -> ServiceResult<String> {
        let chats = self.repo.list_chats(CompanyId::new(company_id)?)?;
        let board = KanbanBoard::build(&chats, Utc::now().date_naive());
        let mut context = Context::new();
        context.insert("board", &board);
        Ok(self.tera.render("live/chats.html", &context)?)
    }
}

/// First page of the client list, unfiltered. Searching and paging go
/// through the regular page route; the live region only mirrors writes.
pub struct ClientsView<R> {
    repo: R,
    tera: Arc<Tera>,
}

impl<R> ClientsView<R> {
    pub fn new(repo: R, tera: Arc<Tera>) -> Self {
        Self { repo, tera }
    }
}

impl<R> ViewSource for ClientsView<R>
where
    R: ClientReader + Send + Sync + 'static,
{
    type Output = String;

    fn entities(&self) -> &'static [EntityKind] {
        &[EntityKind::Client]
    }

    fn fetch(&self, company_id: i32) -> ServiceResult<String> {
        let query =
            ClientListQuery::new(CompanyId::new(company_id)?).paginate(1, DEFAULT_ITEMS_PER_PAGE);
        let (total, clients) = self.repo.list_clients(query)?;
        let rows: Vec<ClientRow> = clients.iter().map(ClientRow::from).collect();
        let mut context = Context::new();
        context.insert("clients", &rows);
        context.insert("total", &total);
        Ok(self.tera.render("live/clients.html", &context)?)
    }
}

/// The product catalogue table.
pub struct ProductsView<R> {
    repo: R,
    tera: Arc<Tera>,
}

impl<R> ProductsView<R> {
    pub fn new(repo: R, tera: Arc<Tera>) -> Self {
        Self { repo, tera }
    }
}

impl<R> ViewSource for ProductsView<R>
where
    R: ProductReader + Send + Sync + 'static,
{
    type Output = String;

    fn entities(&self) -> &'static [EntityKind] {
        &[EntityKind::Product]
    }

    fn fetch(&self, company_id: i32) -> ServiceResult<String> {
        let products = self.repo.list_products(CompanyId::new(company_id)?)?;
        let rows: Vec<ProductRow> = products.iter().map(ProductRow::from).collect();
        let mut context = Context::new();
        context.insert("products", &rows);
        Ok(self.tera.render("live/products.html", &context)?)
    }
}

/// The AI agent settings form plus the knowledge-base file list.
pub struct SettingsView<R> {
    repo: R,
    store: FileStore,
    tera: Arc<Tera>,
}

impl<R> SettingsView<R> {
    pub fn new(repo: R, store: FileStore, tera: Arc<Tera>) -> Self {
        Self { repo, store, tera }
    }
}

impl<R> ViewSource for SettingsView<R>
where
    R: SettingsReader + Send + Sync + 'static,
{
    type Output = String;

    fn entities(&self) -> &'static [EntityKind] {
        &[EntityKind::Settings]
    }

    fn fetch(&self, company_id: i32) -> ServiceResult<String> {
        let company_id = CompanyId::new(company_id)?;
        let settings = self.repo.get_settings(company_id)?.unwrap_or_default();
        let files = self.store.list(company_id)?;
        let page = SettingsPage::new(&settings, &files);
        let mut context = Context::new();
        context.insert("settings", &page);
        Ok(self.tera.render("live/settings.html", &context)?)
    }
}
