use crate::SERVICE_ACCESS_ROLE;
use crate::domain::types::CompanyId;
use crate::dto::settings::SettingsPage;
use crate::forms::settings::{SaveSettingsForm, UploadFileForm};
use crate::live::{ChangeFeed, ChangeNotification, ChangeOp, EntityKind};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{SettingsReader, SettingsWriter};
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};
use crate::storage::FileStore;

/// Loads the settings form plus the knowledge-base file list.
pub fn load_settings_page<R>(
    repo: &R,
    store: &FileStore,
    user: &AuthenticatedUser,
) -> ServiceResult<SettingsPage>
where
    R: SettingsReader + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let company_id = CompanyId::new(user.company_id)?;
    let settings = repo.get_settings(company_id)?.unwrap_or_default();
    let files = store.list(company_id)?;

    Ok(SettingsPage::new(&settings, &files))
}

/// Validates and saves the AI agent settings. A blank API key keeps the
/// stored one.
pub fn save_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: &SaveSettingsForm,
) -> ServiceResult<()>
where
    R: SettingsWriter + ?Sized,
{
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let updates = form.to_updates().map_err(|err| {
        log::error!("Failed to validate form: {err}");
        ServiceError::Form("Configurações inválidas".to_string())
    })?;

    repo.upsert_settings(CompanyId::new(user.company_id)?, &updates)
        .map_err(|err| {
            log::error!("Failed to save settings: {err}");
            ServiceError::from(err)
        })?;

    Ok(())
}

/// Stores an uploaded knowledge-base document.
///
/// Files live outside the database, so the change notification is published
/// here instead of in the repository.
pub fn upload_file(
    store: &FileStore,
    feed: &ChangeFeed,
    user: &AuthenticatedUser,
    form: &UploadFileForm,
) -> ServiceResult<()> {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let name = form
        .file
        .file_name
        .as_deref()
        .ok_or_else(|| ServiceError::Form("Nome do arquivo ausente".to_string()))?;

    store
        .save(
            CompanyId::new(user.company_id)?,
            name,
            form.file.file.path(),
        )
        .map_err(|err| {
            log::error!("Failed to store uploaded file: {err}");
            ServiceError::from(err)
        })?;

    feed.publish(ChangeNotification {
        company_id: user.company_id,
        entity: EntityKind::Settings,
        op: ChangeOp::Update,
    });

    Ok(())
}

/// Deletes a knowledge-base document.
pub fn delete_file(
    store: &FileStore,
    feed: &ChangeFeed,
    user: &AuthenticatedUser,
    name: &str,
) -> ServiceResult<()> {
    if !check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    store
        .remove(CompanyId::new(user.company_id)?, name)
        .map_err(|err| {
            log::error!("Failed to delete file: {err}");
            ServiceError::from(err)
        })?;

    feed.publish(ChangeNotification {
        company_id: user.company_id,
        entity: EntityKind::Settings,
        op: ChangeOp::Delete,
    });

    Ok(())
}
