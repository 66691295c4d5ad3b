//! Reqwest implementation of [`BillingApi`] against the payment proxy.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::billing::{
    BillingApi, BillingError, BillingResult, CreateCustomer, CreateSubscription, Customer,
    Subscription,
};

/// HTTP client for the payment-provider proxy.
#[derive(Clone)]
pub struct BillingClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct InvoiceUrlBody {
    url: Option<String>,
}

impl BillingClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> BillingResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| status.to_string());
        Err(BillingError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> BillingResult<T> {
        let response = self
            .http
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> BillingResult<T> {
        let response = self
            .http
            .get(format!("{}{path}", self.base_url))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        Self::decode(response).await
    }
}

impl BillingApi for BillingClient {
    async fn create_customer(&self, request: &CreateCustomer) -> BillingResult<Customer> {
        self.post("/v1/customers", request).await
    }

    async fn create_subscription(
        &self,
        request: &CreateSubscription,
    ) -> BillingResult<Subscription> {
        self.post("/v1/subscriptions", request).await
    }

    async fn subscription_status(&self, subscription_id: &str) -> BillingResult<Subscription> {
        self.get(&format!("/v1/subscriptions/{subscription_id}"))
            .await
    }

    async fn latest_invoice_url(&self, subscription_id: &str) -> BillingResult<Option<String>> {
        let body: InvoiceUrlBody = self
            .get(&format!("/v1/subscriptions/{subscription_id}/invoice"))
            .await?;
        Ok(body.url)
    }
}
