use crate::api::error::ApiError;
use std::fmt::{Display, Formatter};

pub(crate) mod client;
pub use client::AnalyticsClient;
pub mod error;
pub mod types;

#[cfg(test)]
use mockall::automock;

/// A GET request against the analytics API, relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Endpoint {
    /// Builds an endpoint from literal path segments, e.g. `"products/new_count"`.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            query: Vec::new(),
        }
    }

    /// Appends a path parameter. It is percent-encoded when rendered.
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Joins this endpoint with the API base URL.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self)
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", urlencoding::encode(segment))?;
        }
        for (i, (key, value)) in self.query.iter().enumerate() {
            let separator = if i == 0 { '?' } else { '&' };
            write!(
                f,
                "{}{}={}",
                separator,
                urlencoding::encode(key),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Base URL every endpoint is resolved against.
    fn base_url(&self) -> &str;

    /// Issue one GET request and decode the body as JSON.
    async fn fetch_json(&self, endpoint: &Endpoint) -> Result<serde_json::Value, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_renders_path_and_query() {
        let endpoint = Endpoint::new("customers/global_recent").with_query("limit", "5");
        assert_eq!(endpoint.to_string(), "/customers/global_recent?limit=5");
    }

    #[test]
    fn test_endpoint_encodes_path_parameters() {
        let endpoint = Endpoint::new("/customers/geo_distribution_hourly_by_country/")
            .with_segment("United States");
        assert_eq!(
            endpoint.to_string(),
            "/customers/geo_distribution_hourly_by_country/United%20States"
        );
    }

    #[test]
    fn test_endpoint_url_joins_base_without_double_slash() {
        let endpoint = Endpoint::new("status");
        assert_eq!(
            endpoint.url("http://localhost:5000/api/v1/"),
            "http://localhost:5000/api/v1/status"
        );
    }

    #[test]
    fn test_endpoint_multiple_query_pairs() {
        let endpoint = Endpoint::new("products/new_count")
            .with_query("period", "5min")
            .with_query("tag", "a&b");
        assert_eq!(
            endpoint.to_string(),
            "/products/new_count?period=5min&tag=a%26b"
        );
    }
}
