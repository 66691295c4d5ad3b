pub mod billing;
pub mod chats;
pub mod clients;
pub mod dashboard;
pub mod errors;
pub mod products;
pub mod settings;

pub use errors::{ServiceError, ServiceResult};
