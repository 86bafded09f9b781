//! Session setup and initialization

use crate::api::{AnalyticsApi, AnalyticsClient};
use crate::config::Config;
use crate::consts::dashboard_consts::EVENT_QUEUE_SIZE;
use crate::dashboard::Dashboard;
use crate::document::{Document, DocumentError};
use crate::events::{Event, EventSender};
use crate::panels;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Filter values chosen on the command line, applied after the dropdowns
/// are populated.
#[derive(Debug, Clone, Default)]
pub struct FilterOverrides {
    pub period: Option<String>,
    pub category: Option<String>,
    pub country: Option<String>,
}

impl FilterOverrides {
    /// # Errors
    /// Returns the first value that is not an option of its control.
    pub fn apply(&self, document: &Document) -> Result<(), DocumentError> {
        if let Some(period) = &self.period {
            document.period_select().select(period)?;
        }
        if let Some(category) = &self.category {
            document.category_select().select(category)?;
        }
        if let Some(country) = &self.country {
            document.country_select().select(country)?;
        }
        Ok(())
    }
}

/// Session data shared by the polling and snapshot modes
pub struct SessionData {
    /// The dashboard, selectors already populated
    pub dashboard: Arc<Dashboard>,
    /// Panel refresh events
    pub event_receiver: mpsc::Receiver<Event>,
    /// API base URL (for display purposes)
    pub api_base_url: String,
    /// Where to write the rendered page
    pub output_path: Option<PathBuf>,
}

/// Sets up a dashboard session talking to the API named in `config`.
///
/// # Errors
/// Fails when a filter override is not a valid option.
pub fn setup_session(
    config: &Config,
    filters: &FilterOverrides,
) -> Result<SessionData, Box<dyn Error>> {
    let api_base_url = config.api_base_url.trim_end_matches('/').to_string();
    let api = Arc::new(AnalyticsClient::new(
        api_base_url,
        config.request_timeout(),
    ));
    setup_session_with_api(api, config, filters)
}

/// Same as [`setup_session`] with a caller-supplied API.
pub fn setup_session_with_api(
    api: Arc<dyn AnalyticsApi>,
    config: &Config,
    filters: &FilterOverrides,
) -> Result<SessionData, Box<dyn Error>> {
    let api_base_url = api.base_url().to_string();
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);

    let dashboard = Dashboard::new(
        api,
        Document::new(),
        panels::all(config.recent_customers_limit),
        EventSender::new(event_sender),
        config.refresh_interval(),
    );
    dashboard.prepare();
    filters.apply(dashboard.document())?;

    Ok(SessionData {
        dashboard: Arc::new(dashboard),
        event_receiver,
        api_base_url,
        output_path: config.output_path.clone(),
    })
}
