//! Analytics API Client
//!
//! A reqwest client for the e-commerce analytics REST API.

use crate::api::error::ApiError;
use crate::api::{AnalyticsApi, Endpoint};
use crate::consts::dashboard_consts::http;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

// User-Agent string with the dashboard version
const USER_AGENT: &str = concat!("analytics-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    client: Client,
    base_url: String,
}

impl AnalyticsClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// `request_timeout` bounds the whole request; without it only the
    /// connection attempt is bounded.
    pub fn new(base_url: impl Into<String>, request_timeout: Option<Duration>) -> Self {
        let mut builder = ClientBuilder::new().connect_timeout(http::connect_timeout());
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            client: builder.build().expect("Failed to create HTTP client"),
            base_url: base_url.into(),
        }
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl AnalyticsApi for AnalyticsClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_json(&self, endpoint: &Endpoint) -> Result<serde_json::Value, ApiError> {
        let url = endpoint.url(&self.base_url);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&response_bytes)?)
    }
}
