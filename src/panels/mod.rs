//! Dashboard panels
//!
//! Each panel binds one API endpoint to one container. The fetch, decode and
//! template selection flow is shared; panels only supply the endpoint, the
//! empty-state predicate and their templates.

use crate::api::error::ApiError;
use crate::api::{AnalyticsApi, Endpoint};
use crate::consts::dashboard_consts::elements;
use crate::document::{FilterSelection, RenderTarget};
use crate::render::{self, Fragment};
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub mod category;
pub mod customers;
pub mod geo;
pub mod new_products;
pub mod status;

pub use category::ProductsByCategoryPanel;
pub use customers::RecentCustomersPanel;
pub use geo::GeoDistributionPanel;
pub use new_products::NewProductsPanel;
pub use status::StatusPanel;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, strum::Display)]
pub enum PanelKind {
    #[strum(to_string = "api status")]
    Status,
    #[strum(to_string = "recent customers")]
    RecentCustomers,
    #[strum(to_string = "new products")]
    NewProducts,
    #[strum(to_string = "products by category")]
    ProductsByCategory,
    #[strum(to_string = "geo distribution")]
    GeoDistribution,
}

impl PanelKind {
    pub const ALL: [PanelKind; 5] = [
        PanelKind::Status,
        PanelKind::RecentCustomers,
        PanelKind::NewProducts,
        PanelKind::ProductsByCategory,
        PanelKind::GeoDistribution,
    ];

    /// Identifier of the container this panel renders into.
    pub fn container_id(&self) -> &'static str {
        match self {
            PanelKind::Status => elements::API_STATUS,
            PanelKind::RecentCustomers => elements::RECENT_CUSTOMERS,
            PanelKind::NewProducts => elements::NEW_PRODUCTS,
            PanelKind::ProductsByCategory => elements::PRODUCTS_BY_CATEGORY,
            PanelKind::GeoDistribution => elements::GEO_DISTRIBUTION,
        }
    }
}

/// Which template a refresh ended up rendering.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The success template.
    Rendered,
    /// The panel's empty-state template.
    Empty,
    /// An error template; the error is reported, never propagated.
    Failed(ApiError),
}

/// Endpoint, predicate and templates of one panel.
pub trait Panel: Send + Sync + 'static {
    type Payload: DeserializeOwned + Send;

    fn kind(&self) -> PanelKind;

    fn endpoint(&self, filters: &FilterSelection) -> Endpoint;

    /// True when the payload lacks the data the success template needs.
    fn is_empty(&self, payload: &Self::Payload) -> bool;

    fn render(&self, payload: &Self::Payload, filters: &FilterSelection) -> Fragment;

    fn render_empty(&self) -> Fragment;

    fn render_error(&self, _error: &ApiError) -> Fragment {
        render::error_fragment()
    }

    /// Turn a failed request into a payload when the failure carries data,
    /// e.g. a status code the backend uses to mean "no rows".
    fn recover(&self, _error: &ApiError) -> Option<Self::Payload> {
        None
    }
}

/// Object-safe refresher, implemented for every [`Panel`].
#[async_trait::async_trait]
pub trait PanelRefresh: Send + Sync {
    fn kind(&self) -> PanelKind;

    /// Run one fetch-then-render cycle against `target`.
    async fn refresh(
        &self,
        api: &dyn AnalyticsApi,
        target: &dyn RenderTarget,
        filters: &FilterSelection,
    ) -> RefreshOutcome;
}

async fn fetch_payload<P: Panel>(
    panel: &P,
    api: &dyn AnalyticsApi,
    endpoint: &Endpoint,
) -> Result<P::Payload, ApiError> {
    match api.fetch_json(endpoint).await {
        Ok(body) => Ok(serde_json::from_value(body)?),
        Err(e) => panel.recover(&e).ok_or(e),
    }
}

/// Holds a container's loading indicator on until dropped, so an aborted
/// refresh does not leave it spinning.
struct LoadingGuard<'a> {
    target: &'a dyn RenderTarget,
}

impl<'a> LoadingGuard<'a> {
    fn start(target: &'a dyn RenderTarget) -> Self {
        target.set_loading(true);
        Self { target }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.target.set_loading(false);
    }
}

#[async_trait::async_trait]
impl<P: Panel> PanelRefresh for P {
    fn kind(&self) -> PanelKind {
        Panel::kind(self)
    }

    async fn refresh(
        &self,
        api: &dyn AnalyticsApi,
        target: &dyn RenderTarget,
        filters: &FilterSelection,
    ) -> RefreshOutcome {
        let _loading = LoadingGuard::start(target);

        let endpoint = self.endpoint(filters);
        match fetch_payload(self, api, &endpoint).await {
            Ok(payload) if self.is_empty(&payload) => {
                target.set_content(self.render_empty());
                RefreshOutcome::Empty
            }
            Ok(payload) => {
                target.set_content(self.render(&payload, filters));
                RefreshOutcome::Rendered
            }
            Err(e) => {
                target.set_content(self.render_error(&e));
                RefreshOutcome::Failed(e)
            }
        }
    }
}

/// The five dashboard panels.
pub fn all(recent_customers_limit: u32) -> Vec<Arc<dyn PanelRefresh>> {
    vec![
        Arc::new(StatusPanel),
        Arc::new(RecentCustomersPanel::new(recent_customers_limit)),
        Arc::new(NewProductsPanel),
        Arc::new(ProductsByCategoryPanel),
        Arc::new(GeoDistributionPanel),
    ]
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::api::MockAnalyticsApi;
    use serde_json::json;

    #[test]
    fn test_all_panels_cover_every_kind_once() {
        let kinds: Vec<PanelKind> = all(5).iter().map(|p| p.kind()).collect();
        assert_eq!(kinds, PanelKind::ALL.to_vec());
    }

    #[test]
    fn test_container_ids_are_distinct() {
        let mut ids: Vec<&str> = PanelKind::ALL.iter().map(|k| k.container_id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    /// A body that decodes as JSON but not as the payload shape is a failure.
    async fn test_shape_mismatch_renders_error() {
        let mut api = MockAnalyticsApi::new();
        api.expect_fetch_json()
            .returning(|_| Ok(json!({ "new_products_count": "many" })));

        let target = RecordingTarget::default();
        let outcome = NewProductsPanel
            .refresh(&api, &target, &default_filters())
            .await;

        assert!(matches!(outcome, RefreshOutcome::Failed(ApiError::Decode(_))));
        assert!(target.rendered().contains("Error al cargar los datos"));
    }

    #[tokio::test]
    /// Non-2xx responses are failures unless the panel recovers them.
    async fn test_server_error_renders_error() {
        let mut api = MockAnalyticsApi::new();
        api.expect_fetch_json().returning(|_| {
            Err(ApiError::Http {
                status: 500,
                message: r#"{"error": "Cassandra connection failed"}"#.to_string(),
            })
        });

        let target = RecordingTarget::default();
        let outcome = GeoDistributionPanel
            .refresh(&api, &target, &default_filters())
            .await;

        assert!(matches!(outcome, RefreshOutcome::Failed(_)));
        assert!(target.rendered().contains("alert-danger"));
    }

    /// Never answers, so a refresh against it can only end by being dropped.
    struct PendingApi;

    #[async_trait::async_trait]
    impl AnalyticsApi for PendingApi {
        fn base_url(&self) -> &str {
            "http://analytics.test/api/v1"
        }

        async fn fetch_json(&self, _endpoint: &Endpoint) -> Result<serde_json::Value, ApiError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    /// Dropping a refresh mid-request clears the loading indicator without writing content.
    async fn test_aborted_refresh_clears_loading() {
        let target = RecordingTarget::default();

        let result = tokio::time::timeout(
            std::time::Duration::from_secs(5),
            StatusPanel.refresh(&PendingApi, &target, &default_filters()),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(
            target.calls(),
            vec![Call::Loading(true), Call::Loading(false)]
        );
    }
}
