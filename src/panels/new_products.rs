//! New products counter panel

use super::{Panel, PanelKind};
use crate::api::Endpoint;
use crate::api::types::NewProductCount;
use crate::document::FilterSelection;
use crate::render::{self, Fragment};

/// Number of products added in the selected period.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewProductsPanel;

impl Panel for NewProductsPanel {
    type Payload = NewProductCount;

    fn kind(&self) -> PanelKind {
        PanelKind::NewProducts
    }

    fn endpoint(&self, filters: &FilterSelection) -> Endpoint {
        Endpoint::new("products/new_count").with_query("period", filters.period.as_str())
    }

    fn is_empty(&self, payload: &NewProductCount) -> bool {
        payload.new_products_count.is_none()
    }

    fn render(&self, payload: &NewProductCount, _filters: &FilterSelection) -> Fragment {
        Fragment::new(format!(
            r#"
                <div class="d-flex align-items-center">
                    <div class="stats-value me-2">{}</div>
                    <div class="text-muted me-3">productos</div>
                    <div class="badge bg-success">
                        <i class="bi bi-clock"></i> {}
                    </div>
                </div>"#,
            render::count(payload.new_products_count),
            render::format_time_bucket(payload.time_bucket.as_deref()),
        ))
    }

    fn render_empty(&self) -> Fragment {
        Fragment::new(
            r#"
                <div class="alert alert-warning">
                    <i class="bi bi-exclamation-triangle-fill"></i>
                    No hay datos disponibles
                </div>"#,
        )
    }
}
