//! Framework-free domain entities and value objects.

pub mod billing;
pub mod chat;
pub mod client;
pub mod company;
pub mod metrics;
pub mod product;
pub mod settings;
pub mod types;
