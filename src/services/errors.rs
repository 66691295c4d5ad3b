//! Error taxonomy shared by all services.
//!
//! Every failure resolves to a bounded UI state: `Unauthorized` becomes a
//! login redirect, role failures a warning redirect, everything else a flash
//! toast or an inline error block. Nothing here is process-fatal and no retry
//! is scheduled anywhere.

use thiserror::Error;

use crate::billing::BillingError;
use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("form error: {0}")]
    Form(String),

    #[error("type constraint: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<TypeConstraintError> for ServiceError {
    fn from(err: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(err.to_string())
    }
}

impl From<tera::Error> for ServiceError {
    fn from(err: tera::Error) -> Self {
        ServiceError::Internal(format!("Template error: {err}"))
    }
}
