//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// Root directory of the per-company file store.
    pub storage_dir: String,
    pub secret: String,
    pub auth_service_url: String,
    /// Base URL of the payment provider proxy.
    pub billing_proxy_url: String,
    pub billing_proxy_key: String,
}
