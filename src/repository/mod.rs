//! Repository traits and the Diesel-backed implementation.
//!
//! Reads and writes are split per entity so services only name the access
//! they need. Every query is scoped to the tenant; every successful write on
//! a tenant-scoped table publishes a [`ChangeNotification`] on the feed.

use crate::db::DbPool;
use crate::domain::billing::{Affiliate, Coupon, NewAffiliate, NewCoupon, NewPlan, Plan};
use crate::domain::chat::{Chat, ChatStage, NewChat};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::company::{Company, NewCompany, UpdateCompanyBilling};
use crate::domain::metrics::DashboardMetrics;
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::settings::{AiSettings, UpdateAiSettings};
use crate::domain::types::{
    AffiliateId, ChatId, ClientId, CompanyId, CouponId, PlanId, ProductId,
};
use crate::live::{ChangeFeed, ChangeNotification, ChangeOp, EntityKind};
use crate::repository::errors::RepositoryResult;

pub mod catalog;
pub mod chat;
pub mod client;
pub mod errors;
#[cfg(test)]
pub mod mock;
pub mod product;
pub mod settings;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

/// Filter for the tenant's client list.
#[derive(Debug, Clone)]
pub struct ClientListQuery {
    pub company_id: CompanyId,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            company_id,
            search: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait ChatReader {
    fn get_chat_by_id(&self, id: ChatId, company_id: CompanyId)
    -> RepositoryResult<Option<Chat>>;
    fn list_chats(&self, company_id: CompanyId) -> RepositoryResult<Vec<Chat>>;
}

pub trait ChatWriter {
    fn create_chat(&self, new_chat: &NewChat) -> RepositoryResult<Chat>;
    fn set_chat_stage(
        &self,
        id: ChatId,
        company_id: CompanyId,
        stage: ChatStage,
    ) -> RepositoryResult<Chat>;
    fn delete_chat(&self, id: ChatId, company_id: CompanyId) -> RepositoryResult<()>;
}

pub trait ClientReader {
    fn get_client_by_id(
        &self,
        id: ClientId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

pub trait ClientWriter {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
    fn update_client(
        &self,
        id: ClientId,
        company_id: CompanyId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client>;
    fn delete_client(&self, id: ClientId, company_id: CompanyId) -> RepositoryResult<()>;
}

pub trait ProductReader {
    fn get_product_by_id(
        &self,
        id: ProductId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, company_id: CompanyId) -> RepositoryResult<Vec<Product>>;
}

pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(
        &self,
        id: ProductId,
        company_id: CompanyId,
        updates: &UpdateProduct,
    ) -> RepositoryResult<Product>;
    fn delete_product(&self, id: ProductId, company_id: CompanyId) -> RepositoryResult<()>;
}

pub trait SettingsReader {
    fn get_settings(&self, company_id: CompanyId) -> RepositoryResult<Option<AiSettings>>;
}

pub trait SettingsWriter {
    /// Creates or replaces the company's AI settings. A `None` API key keeps
    /// the stored one.
    fn upsert_settings(
        &self,
        company_id: CompanyId,
        updates: &UpdateAiSettings,
    ) -> RepositoryResult<AiSettings>;
}

pub trait CompanyReader {
    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>>;
}

pub trait CompanyWriter {
    fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company>;
    fn update_company_billing(
        &self,
        id: CompanyId,
        updates: &UpdateCompanyBilling,
    ) -> RepositoryResult<Company>;
}

pub trait PlanReader {
    fn get_plan_by_id(&self, id: PlanId) -> RepositoryResult<Option<Plan>>;
    fn list_plans(&self) -> RepositoryResult<Vec<Plan>>;
}

pub trait PlanWriter {
    fn create_plan(&self, new_plan: &NewPlan) -> RepositoryResult<Plan>;
    fn update_plan(&self, id: PlanId, updates: &NewPlan) -> RepositoryResult<Plan>;
    fn delete_plan(&self, id: PlanId) -> RepositoryResult<()>;
}

pub trait CouponReader {
    fn get_coupon_by_code(&self, code: &str) -> RepositoryResult<Option<Coupon>>;
    fn list_coupons(&self) -> RepositoryResult<Vec<(Coupon, Option<Affiliate>)>>;
}

pub trait CouponWriter {
    fn create_coupon(&self, new_coupon: &NewCoupon) -> RepositoryResult<Coupon>;
    fn deactivate_coupon(&self, id: CouponId) -> RepositoryResult<Coupon>;
}

pub trait AffiliateReader {
    fn list_affiliates(&self) -> RepositoryResult<Vec<(Affiliate, Vec<Coupon>)>>;
    fn get_affiliate_by_id(&self, id: AffiliateId) -> RepositoryResult<Option<Affiliate>>;
}

pub trait AffiliateWriter {
    fn create_affiliate(&self, new_affiliate: &NewAffiliate) -> RepositoryResult<Affiliate>;
}

pub trait MetricsReader {
    fn dashboard_metrics(&self, company_id: CompanyId) -> RepositoryResult<DashboardMetrics>;
}

/// Diesel implementation of all repository traits.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
    feed: ChangeFeed,
}

impl DieselRepository {
    pub fn new(pool: DbPool, feed: ChangeFeed) -> Self {
        Self { pool, feed }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<crate::db::DbConnection> {
        Ok(self.pool.get()?)
    }

    /// Publishes a change notification after a successful write.
    pub(crate) fn notify(&self, company_id: CompanyId, entity: EntityKind, op: ChangeOp) {
        self.feed.publish(ChangeNotification {
            company_id: company_id.get(),
            entity,
            op,
        });
    }
}
