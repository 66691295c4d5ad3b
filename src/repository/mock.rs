//! Mock repository implementation for isolating services in tests.

use mockall::mock;

use crate::domain::billing::{Affiliate, Coupon, NewAffiliate, NewCoupon, NewPlan, Plan};
use crate::domain::chat::{Chat, ChatStage, NewChat};
use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::company::{Company, NewCompany, UpdateCompanyBilling};
use crate::domain::metrics::DashboardMetrics;
use crate::domain::product::{NewProduct, Product, UpdateProduct};
use crate::domain::settings::{AiSettings, UpdateAiSettings};
use crate::domain::types::{AffiliateId, ChatId, ClientId, CompanyId, CouponId, PlanId, ProductId};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    AffiliateReader, AffiliateWriter, ChatReader, ChatWriter, ClientListQuery, ClientReader,
    ClientWriter, CompanyReader, CompanyWriter, CouponReader, CouponWriter, MetricsReader,
    PlanReader, PlanWriter, ProductReader, ProductWriter, SettingsReader, SettingsWriter,
};

mock! {
    pub Repository {}

    impl ChatReader for Repository {
        fn get_chat_by_id(&self, id: ChatId, company_id: CompanyId) -> RepositoryResult<Option<Chat>>;
        fn list_chats(&self, company_id: CompanyId) -> RepositoryResult<Vec<Chat>>;
    }

    impl ChatWriter for Repository {
        fn create_chat(&self, new_chat: &NewChat) -> RepositoryResult<Chat>;
        fn set_chat_stage(
            &self,
            id: ChatId,
            company_id: CompanyId,
            stage: ChatStage,
        ) -> RepositoryResult<Chat>;
        fn delete_chat(&self, id: ChatId, company_id: CompanyId) -> RepositoryResult<()>;
    }

    impl ClientReader for Repository {
        fn get_client_by_id(
            &self,
            id: ClientId,
            company_id: CompanyId,
        ) -> RepositoryResult<Option<Client>>;
        fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
    }

    impl ClientWriter for Repository {
        fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
        fn update_client(
            &self,
            id: ClientId,
            company_id: CompanyId,
            updates: &UpdateClient,
        ) -> RepositoryResult<Client>;
        fn delete_client(&self, id: ClientId, company_id: CompanyId) -> RepositoryResult<()>;
    }

    impl ProductReader for Repository {
        fn get_product_by_id(
            &self,
            id: ProductId,
            company_id: CompanyId,
        ) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, company_id: CompanyId) -> RepositoryResult<Vec<Product>>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(
            &self,
            id: ProductId,
            company_id: CompanyId,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product>;
        fn delete_product(&self, id: ProductId, company_id: CompanyId) -> RepositoryResult<()>;
    }

    impl SettingsReader for Repository {
        fn get_settings(&self, company_id: CompanyId) -> RepositoryResult<Option<AiSettings>>;
    }

    impl SettingsWriter for Repository {
        fn upsert_settings(
            &self,
            company_id: CompanyId,
            updates: &UpdateAiSettings,
        ) -> RepositoryResult<AiSettings>;
    }

    impl CompanyReader for Repository {
        fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>>;
    }

    impl CompanyWriter for Repository {
        fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company>;
        fn update_company_billing(
            &self,
            id: CompanyId,
            updates: &UpdateCompanyBilling,
        ) -> RepositoryResult<Company>;
    }

    impl PlanReader for Repository {
        fn get_plan_by_id(&self, id: PlanId) -> RepositoryResult<Option<Plan>>;
        fn list_plans(&self) -> RepositoryResult<Vec<Plan>>;
    }

    impl PlanWriter for Repository {
        fn create_plan(&self, new_plan: &NewPlan) -> RepositoryResult<Plan>;
        fn update_plan(&self, id: PlanId, updates: &NewPlan) -> RepositoryResult<Plan>;
        fn delete_plan(&self, id: PlanId) -> RepositoryResult<()>;
    }

    impl CouponReader for Repository {
        fn get_coupon_by_code(&self, code: &str) -> RepositoryResult<Option<Coupon>>;
        fn list_coupons(&self) -> RepositoryResult<Vec<(Coupon, Option<Affiliate>)>>;
    }

    impl CouponWriter for Repository {
        fn create_coupon(&self, new_coupon: &NewCoupon) -> RepositoryResult<Coupon>;
        fn deactivate_coupon(&self, id: CouponId) -> RepositoryResult<Coupon>;
    }

    impl AffiliateReader for Repository {
        fn list_affiliates(&self) -> RepositoryResult<Vec<(Affiliate, Vec<Coupon>)>>;
        fn get_affiliate_by_id(&self, id: AffiliateId) -> RepositoryResult<Option<Affiliate>>;
    }

    impl AffiliateWriter for Repository {
        fn create_affiliate(&self, new_affiliate: &NewAffiliate) -> RepositoryResult<Affiliate>;
    }

    impl MetricsReader for Repository {
        fn dashboard_metrics(&self, company_id: CompanyId) -> RepositoryResult<DashboardMetrics>;
    }
}
