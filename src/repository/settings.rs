//! Repository implementations for companies, AI settings and dashboard
//! metrics.

use chrono::Utc;
use diesel::prelude::*;

use crate::domain::chat::ChatStage;
use crate::domain::company::{Company, NewCompany, UpdateCompanyBilling};
use crate::domain::metrics::DashboardMetrics;
use crate::domain::settings::{AiSettings, UpdateAiSettings};
use crate::domain::types::CompanyId;
use crate::live::{ChangeOp, EntityKind};
use crate::models::company::{
    Company as DbCompany, NewCompany as DbNewCompany, UpdateCompanyBilling as DbUpdateBilling,
};
use crate::models::settings::{AiSettings as DbAiSettings, NewAiSettings as DbNewAiSettings};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CompanyReader, CompanyWriter, DieselRepository, MetricsReader, SettingsReader, SettingsWriter,
};

impl SettingsReader for DieselRepository {
    fn get_settings(&self, company_id: CompanyId) -> RepositoryResult<Option<AiSettings>> {
        use crate::schema::company_settings;

        let mut conn = self.conn()?;
        let settings = company_settings::table
            .find(company_id.get())
            .first::<DbAiSettings>(&mut conn)
            .optional()?;

        Ok(settings.map(Into::into))
    }
}

impl SettingsWriter for DieselRepository {
    fn upsert_settings(
        &self,
        company_id: CompanyId,
        updates: &UpdateAiSettings,
    ) -> RepositoryResult<AiSettings> {
        use crate::schema::company_settings;

        let mut conn = self.conn()?;

        let settings = conn.transaction::<DbAiSettings, diesel::result::Error, _>(|conn| {
            // A missing key in the payload keeps the stored secret.
            let stored_key: Option<Option<String>> = company_settings::table
                .find(company_id.get())
                .select(company_settings::api_key)
                .first(conn)
                .optional()?;
            let api_key = updates
                .api_key
                .clone()
                .or_else(|| stored_key.flatten());

            let now = Utc::now().naive_utc();
            let row = DbNewAiSettings {
                company_id: company_id.get(),
                agent_name: &updates.agent_name,
                system_prompt: &updates.system_prompt,
                ai_model: &updates.ai_model,
                api_key: api_key.as_deref(),
                webhook_url: updates.webhook_url.as_deref(),
                updated_at: now,
            };

            diesel::insert_into(company_settings::table)
                .values(&row)
                .on_conflict(company_settings::company_id)
                .do_update()
                .set((
                    company_settings::agent_name.eq(&updates.agent_name),
                    company_settings::system_prompt.eq(&updates.system_prompt),
                    company_settings::ai_model.eq(&updates.ai_model),
                    company_settings::api_key.eq(api_key.as_deref()),
                    company_settings::webhook_url.eq(updates.webhook_url.as_deref()),
                    company_settings::updated_at.eq(now),
                ))
                .get_result::<DbAiSettings>(conn)
        })?;

        self.notify(company_id, EntityKind::Settings, ChangeOp::Update);
        Ok(settings.into())
    }
}

impl CompanyReader for DieselRepository {
    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let company = companies::table
            .find(id.get())
            .first::<DbCompany>(&mut conn)
            .optional()?;

        company
            .map(|c| Company::try_from(c).map_err(RepositoryError::from))
            .transpose()
    }
}

impl CompanyWriter for DieselRepository {
    fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let db_new_company: DbNewCompany = new_company.into();

        let company = diesel::insert_into(companies::table)
            .values(&db_new_company)
            .get_result::<DbCompany>(&mut conn)?;

        Company::try_from(company).map_err(RepositoryError::from)
    }

    fn update_company_billing(
        &self,
        id: CompanyId,
        updates: &UpdateCompanyBilling,
    ) -> RepositoryResult<Company> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateBilling = updates.into();

        let company = diesel::update(companies::table.find(id.get()))
            .set(&db_updates)
            .get_result::<DbCompany>(&mut conn)?;

        self.notify(id, EntityKind::Company, ChangeOp::Update);
        Company::try_from(company).map_err(RepositoryError::from)
    }
}

impl MetricsReader for DieselRepository {
    fn dashboard_metrics(&self, company_id: CompanyId) -> RepositoryResult<DashboardMetrics> {
        use crate::schema::{chats, clients, products};

        let mut conn = self.conn()?;
        let today_start = Utc::now().date_naive().and_time(chrono::NaiveTime::MIN);
        let finalizado = ChatStage::Finalizado.to_string();

        let total_clients: i64 = clients::table
            .filter(clients::company_id.eq(company_id.get()))
            .count()
            .get_result(&mut conn)?;

        let open_chats: i64 = chats::table
            .filter(chats::company_id.eq(company_id.get()))
            .filter(chats::stage.ne(&finalizado))
            .count()
            .get_result(&mut conn)?;

        let chats_today: i64 = chats::table
            .filter(chats::company_id.eq(company_id.get()))
            .filter(chats::created_at.ge(today_start))
            .count()
            .get_result(&mut conn)?;

        let finished_today: i64 = chats::table
            .filter(chats::company_id.eq(company_id.get()))
            .filter(chats::stage.eq(&finalizado))
            .filter(chats::updated_at.ge(today_start))
            .count()
            .get_result(&mut conn)?;

        let active_products: i64 = products::table
            .filter(products::company_id.eq(company_id.get()))
            .filter(products::active.eq(true))
            .count()
            .get_result(&mut conn)?;

        Ok(DashboardMetrics {
            total_clients,
            open_chats,
            chats_today,
            finished_today,
            active_products,
        })
    }
}
