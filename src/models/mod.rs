//! Diesel persistence models and framework-facing value types.

pub mod auth;
pub mod billing;
pub mod chat;
pub mod client;
pub mod company;
pub mod config;
pub mod product;
pub mod settings;
