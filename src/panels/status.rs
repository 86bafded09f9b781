//! API health panel

use super::{Panel, PanelKind};
use crate::api::Endpoint;
use crate::api::error::ApiError;
use crate::api::types::StatusReport;
use crate::document::FilterSelection;
use crate::render::Fragment;

/// Shows whether the API can reach its datastore.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusPanel;

impl Panel for StatusPanel {
    type Payload = StatusReport;

    fn kind(&self) -> PanelKind {
        PanelKind::Status
    }

    fn endpoint(&self, _filters: &FilterSelection) -> Endpoint {
        Endpoint::new("status")
    }

    fn is_empty(&self, payload: &StatusReport) -> bool {
        payload.cassandra_connected != Some(true)
    }

    fn render(&self, _payload: &StatusReport, _filters: &FilterSelection) -> Fragment {
        Fragment::new(
            r#"
                <div class="alert alert-success">
                    <i class="bi bi-check-circle-fill"></i>
                    <strong>Sistema Operativo</strong>
                    <br>
                    <small>Conexión establecida con Cassandra</small>
                </div>"#,
        )
    }

    fn render_empty(&self) -> Fragment {
        Fragment::new(
            r#"
                <div class="alert alert-warning">
                    <i class="bi bi-exclamation-triangle-fill"></i>
                    <strong>Advertencia</strong>
                    <br>
                    <small>API operativa pero sin conexión a Cassandra</small>
                </div>"#,
        )
    }

    fn render_error(&self, _error: &ApiError) -> Fragment {
        Fragment::new(
            r#"
                <div class="alert alert-danger">
                    <i class="bi bi-x-circle-fill"></i>
                    <strong>Error</strong>
                    <br>
                    <small>No se puede establecer conexión con la API</small>
                </div>"#,
        )
    }

    /// The API answers 500 with `cassandra_connected: false` while the
    /// datastore is down. That is a report, not an outage.
    fn recover(&self, error: &ApiError) -> Option<StatusReport> {
        let report: StatusReport = serde_json::from_value(error.json_body()?).ok()?;
        report.cassandra_connected.map(|_| report)
    }
}
