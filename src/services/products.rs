use crate::SERVICE_ACCESS_ROLE;
use crate::domain::types::{CompanyId, ProductId};
use crate::dto::products::ProductRow;
use crate::forms::products::{AddProductForm, SaveProductForm};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ProductReader, ProductWriter};
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};

/// Loads the company's product catalogue.
pub fn list_products<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<ProductRow>>
where
    R: ProductReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let products = repo.list_products(CompanyId::new(user.company_id)?)?;
    Ok(products.iter().map(ProductRow::from).collect())
}

/// Validates the form and adds a catalogue product.
pub fn add_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &AddProductForm,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let new_product = form.to_new_product(user.company_id).map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form("Dados do produto inválidos".to_string())
    })?;

    repo.create_product(&new_product).map_err(|err| {
        log::error!("Failed to add product: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

/// Applies form updates to an existing product.
pub fn update_product<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &SaveProductForm,
) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form.to_updates().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form("Dados do produto inválidos".to_string())
    })?;

    repo.update_product(
        ProductId::new(form.id)?,
        CompanyId::new(user.company_id)?,
        &updates,
    )
    .map_err(|err| {
        log::error!("Failed to update product: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

/// Removes a product from the catalogue.
pub fn delete_product<R>(repo: &R, user: &AuthenticatedUser, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    repo.delete_product(
        ProductId::new(product_id)?,
        CompanyId::new(user.company_id)?,
    )
    .map_err(|err| {
        log::error!("Failed to delete product: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockRepository;

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".to_string(),
            email: "user@example.com".to_string(),
            name: "User".to_string(),
            company_id: 7,
            roles: vec![SERVICE_ACCESS_ROLE.to_string()],
            exp: usize::MAX,
        }
    }

    #[test]
    fn negative_price_is_rejected_before_the_repository() {
        let repo = MockRepository::new();
        let form = AddProductForm {
            name: "Plano X".to_string(),
            description: None,
            price_cents: -1,
        };

        assert!(matches!(
            add_product(&repo, &user(), &form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn list_requires_the_access_role() {
        let repo = MockRepository::new();
        let mut no_role = user();
        no_role.roles.clear();

        assert!(matches!(
            list_products(&repo, &no_role),
            Err(ServiceError::Unauthorized)
        ));
    }
}
