//! Client for the payment-provider proxy.
//!
//! The dashboard never talks to the payment provider directly; all calls go
//! through a server-side proxy that owns the provider credentials. Only the
//! four operations the dashboard needs are modeled.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod http;

pub use http::BillingClient;

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("billing request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("billing proxy answered {status}: {message}")]
    Api { status: u16, message: String },
}

pub type BillingResult<T> = Result<T, BillingError>;

/// Payload for registering a company as a provider customer.
#[derive(Debug, Clone, Serialize)]
pub struct CreateCustomer {
    /// Stable external reference, the company's public id.
    pub reference: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Customer {
    pub id: String,
}

/// Payload for opening a subscription on a provider plan.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSubscription {
    pub customer_id: String,
    pub plan_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Subscription {
    pub id: String,
    /// Provider-side status, e.g. `active`, `past_due`, `canceled`.
    pub status: String,
}

/// The four proxy operations the dashboard consumes.
pub trait BillingApi: Send + Sync {
    fn create_customer(
        &self,
        request: &CreateCustomer,
    ) -> impl Future<Output = BillingResult<Customer>> + Send;

    fn create_subscription(
        &self,
        request: &CreateSubscription,
    ) -> impl Future<Output = BillingResult<Subscription>> + Send;

    fn subscription_status(
        &self,
        subscription_id: &str,
    ) -> impl Future<Output = BillingResult<Subscription>> + Send;

    fn latest_invoice_url(
        &self,
        subscription_id: &str,
    ) -> impl Future<Output = BillingResult<Option<String>>> + Send;
}
