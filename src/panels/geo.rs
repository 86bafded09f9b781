//! Geographic distribution panel

use super::{Panel, PanelKind};
use crate::api::Endpoint;
use crate::api::types::{CityCount, GeoDistributionReport};
use crate::document::FilterSelection;
use crate::render::{self, Fragment};

/// New customers of the selected country in the current hour, per city.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoDistributionPanel;

impl GeoDistributionPanel {
    fn render_city(city: &CityCount) -> String {
        format!(
            r#"
                <div class="col-md-3 col-sm-6 mb-3">
                    <div class="card h-100 product-card">
                        <div class="card-body text-center">
                            <h6 class="card-title text-primary">{}</h6>
                            <div class="stats-value text-success">{}</div>
                            <small class="text-muted">nuevos clientes</small>
                        </div>
                    </div>
                </div>
            "#,
            render::text(city.city.as_deref()),
            render::count(city.new_customers_count),
        )
    }
}

impl Panel for GeoDistributionPanel {
    type Payload = GeoDistributionReport;

    fn kind(&self) -> PanelKind {
        PanelKind::GeoDistribution
    }

    fn endpoint(&self, filters: &FilterSelection) -> Endpoint {
        Endpoint::new("customers/geo_distribution_hourly_by_country")
            .with_segment(filters.country.as_str())
    }

    fn is_empty(&self, payload: &GeoDistributionReport) -> bool {
        payload
            .distribution_by_city
            .as_ref()
            .is_none_or(|cities| cities.is_empty())
    }

    fn render(&self, payload: &GeoDistributionReport, filters: &FilterSelection) -> Fragment {
        let cities: String = payload
            .distribution_by_city
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(Self::render_city)
            .collect();
        Fragment::new(format!(
            r#"
                <div class="text-center mb-4">
                    <h4>Total de nuevos clientes en {}:</h4>
                    <div class="stats-value text-primary">{}</div>
                    <div class="badge bg-info">
                        <i class="bi bi-clock"></i> {}
                    </div>
                </div>
                <div class="row">
                    {}
                </div>"#,
            render::escape_html(&filters.country),
            render::count(payload.total_new_customers_in_hour_for_country),
            render::format_time_bucket(payload.hour_bucket.as_deref()),
            cities
        ))
    }

    fn render_empty(&self) -> Fragment {
        render::empty_fragment(
            "bi-globe",
            "No hay datos de distribución geográfica disponibles",
        )
    }
}
