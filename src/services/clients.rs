use crate::SERVICE_ACCESS_ROLE;
use crate::domain::types::{ClientId, CompanyId};
use crate::dto::clients::{ClientRow, ClientsPageData, ClientsQuery};
use crate::forms::clients::{AddClientForm, SaveClientForm};
use crate::models::auth::AuthenticatedUser;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ClientListQuery, ClientReader, ClientWriter};
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};

/// Loads the paginated, optionally filtered client list.
pub fn load_clients_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: ClientsQuery,
) -> ServiceResult<ClientsPageData>
where
    R: ClientReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let page = query.page.unwrap_or(1);
    let mut list_query = ClientListQuery::new(CompanyId::new(user.company_id)?)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);

    let search_query = query
        .search
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    let (total, clients) = repo.list_clients(list_query)?;

    let rows: Vec<ClientRow> = clients.iter().map(ClientRow::from).collect();
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(ClientsPageData {
        clients: Paginated::new(rows, page, total_pages),
        total,
        search_query,
    })
}

/// Validates the add-client form and persists a new client record.
pub fn add_client<R>(repo: &R, user: &AuthenticatedUser, form: &AddClientForm) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_client = form.to_new_client(user.company_id).map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form("Dados do cliente inválidos".to_string())
    })?;

    repo.create_clients(&[new_client]).map_err(|err| {
        log::error!("Failed to add a client: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

/// Applies form updates to an existing client.
pub fn update_client<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &SaveClientForm,
) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form.to_updates().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form("Dados do cliente inválidos".to_string())
    })?;

    repo.update_client(
        ClientId::new(form.id)?,
        CompanyId::new(user.company_id)?,
        &updates,
    )
    .map_err(|err| {
        log::error!("Failed to update client: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

/// Deletes a client record.
pub fn delete_client<R>(repo: &R, user: &AuthenticatedUser, client_id: i32) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_client(ClientId::new(client_id)?, CompanyId::new(user.company_id)?)
        .map_err(|err| {
            log::error!("Failed to delete client: {err}");
            ServiceError::from(err)
        })?;

    Ok(())
}
