//! Repository implementation for end clients.

use diesel::prelude::*;

use crate::domain::client::{Client, NewClient, UpdateClient};
use crate::domain::types::{ClientId, CompanyId};
use crate::live::{ChangeOp, EntityKind};
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, DieselRepository};

impl ClientReader for DieselRepository {
    fn get_client_by_id(
        &self,
        id: ClientId,
        company_id: CompanyId,
    ) -> RepositoryResult<Option<Client>> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .find(id.get())
            .filter(clients::company_id.eq(company_id.get()))
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let build = || {
            let mut q = clients::table
                .filter(clients::company_id.eq(query.company_id.get()))
                .into_boxed();
            if let Some(term) = &query.search {
                let pattern = format!("%{term}%");
                q = q.filter(
                    clients::name
                        .like(pattern.clone())
                        .or(clients::phone.like(pattern.clone()))
                        .or(clients::email.like(pattern)),
                );
            }
            q
        };

        let total: i64 = build().count().get_result(&mut conn)?;

        let mut items_query = build().order(clients::name.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            items_query = items_query
                .limit(per_page)
                .offset((page - 1) * per_page);
        }

        let items = items_query
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Client>>();

        Ok((total as usize, items))
    }
}

impl ClientWriter for DieselRepository {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewClient> = new_clients.iter().map(Into::into).collect();
        let affected = diesel::insert_into(clients::table)
            .values(&insertables)
            .execute(&mut conn)?;

        for new_client in new_clients {
            if let Ok(company_id) = CompanyId::new(new_client.company_id) {
                self.notify(company_id, EntityKind::Client, ChangeOp::Insert);
            }
        }
        Ok(affected)
    }

    fn update_client(
        &self,
        id: ClientId,
        company_id: CompanyId,
        updates: &UpdateClient,
    ) -> RepositoryResult<Client> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let db_updates: DbUpdateClient = updates.into();

        let client: Client = diesel::update(
            clients::table
                .find(id.get())
                .filter(clients::company_id.eq(company_id.get())),
        )
        .set(&db_updates)
        .get_result::<DbClient>(&mut conn)?
        .into();

        self.notify(company_id, EntityKind::Client, ChangeOp::Update);
        Ok(client)
    }

    fn delete_client(&self, id: ClientId, company_id: CompanyId) -> RepositoryResult<()> {
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            clients::table
                .find(id.get())
                .filter(clients::company_id.eq(company_id.get())),
        )
        .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.notify(company_id, EntityKind::Client, ChangeOp::Delete);
        Ok(())
    }
}
