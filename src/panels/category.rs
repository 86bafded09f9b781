//! Products by category panel

use super::{Panel, PanelKind};
use crate::api::Endpoint;
use crate::api::error::ApiError;
use crate::api::types::{ProductSummary, RecentProducts};
use crate::document::FilterSelection;
use crate::render::{self, Fragment};

/// Latest products of the selected subcategory, under its label.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductsByCategoryPanel;

impl ProductsByCategoryPanel {
    fn render_product(product: &ProductSummary) -> String {
        format!(
            r#"
                <div class="product-card border-bottom py-2">
                    <div class="d-flex justify-content-between align-items-center">
                        <div>
                            <h6 class="mb-0">{}</h6>
                            <small class="text-muted">
                                <i class="bi bi-palette"></i> {}
                            </small>
                        </div>
                        <small class="text-muted">
                            {}
                        </small>
                    </div>
                </div>
            "#,
            render::text(product.english_product_name.as_deref()),
            render::text(product.color.as_deref()),
            render::format_instant(product.addition_timestamp.as_deref()),
        )
    }
}

impl Panel for ProductsByCategoryPanel {
    type Payload = RecentProducts;

    fn kind(&self) -> PanelKind {
        PanelKind::ProductsByCategory
    }

    fn endpoint(&self, filters: &FilterSelection) -> Endpoint {
        Endpoint::new("products/recent_by_category").with_segment(filters.category_key.as_str())
    }

    fn is_empty(&self, payload: &RecentProducts) -> bool {
        payload
            .recent_products
            .as_ref()
            .is_none_or(|products| products.is_empty())
    }

    fn render(&self, payload: &RecentProducts, _filters: &FilterSelection) -> Fragment {
        let products: String = payload
            .recent_products
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(Self::render_product)
            .collect();
        Fragment::new(format!(
            r#"
                <div class="mb-3">
                    <span class="badge bg-warning text-dark">
                        {}
                    </span>
                </div>
                {}"#,
            render::text(payload.category_name.as_deref()),
            products
        ))
    }

    fn render_empty(&self) -> Fragment {
        render::empty_fragment(
            "bi-bicycle",
            "No hay productos recientes en esta categoría",
        )
    }

    /// The API answers 404 when the category has no recent products.
    fn recover(&self, error: &ApiError) -> Option<RecentProducts> {
        (error.status() == Some(404)).then(RecentProducts::default)
    }
}
