//! Recent customers panel

use super::{Panel, PanelKind};
use crate::api::Endpoint;
use crate::api::error::ApiError;
use crate::api::types::{CustomerSummary, RecentCustomers};
use crate::document::FilterSelection;
use crate::render::{self, Fragment};

/// Lists the most recently registered customers, newest first.
#[derive(Debug, Clone, Copy)]
pub struct RecentCustomersPanel {
    limit: u32,
}

impl RecentCustomersPanel {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }

    fn render_customer(customer: &CustomerSummary) -> String {
        format!(
            r#"
                <div class="border-bottom py-2">
                    <div class="d-flex align-items-center">
                        <div class="bg-light rounded-circle p-2 me-2">
                            <i class="bi bi-person"></i>
                        </div>
                        <div>
                            <h6 class="mb-0">{} {}</h6>
                            <small class="text-muted">
                                <i class="bi bi-envelope"></i> {}<br>
                                <i class="bi bi-geo-alt"></i> {}<br>
                                <i class="bi bi-clock"></i> {}
                            </small>
                        </div>
                    </div>
                </div>
            "#,
            render::text(customer.first_name.as_deref()),
            render::text(customer.last_name.as_deref()),
            render::text(customer.email_address.as_deref()),
            render::text(customer.city.as_deref()),
            render::format_instant(customer.registration_timestamp.as_deref()),
        )
    }
}

impl Panel for RecentCustomersPanel {
    type Payload = RecentCustomers;

    fn kind(&self) -> PanelKind {
        PanelKind::RecentCustomers
    }

    fn endpoint(&self, _filters: &FilterSelection) -> Endpoint {
        Endpoint::new("customers/global_recent").with_query("limit", self.limit.to_string())
    }

    fn is_empty(&self, payload: &RecentCustomers) -> bool {
        payload
            .global_recent_customers
            .as_ref()
            .is_none_or(|customers| customers.is_empty())
    }

    fn render(&self, payload: &RecentCustomers, _filters: &FilterSelection) -> Fragment {
        let customers = payload.global_recent_customers.as_deref().unwrap_or_default();
        Fragment::new(
            customers
                .iter()
                .map(Self::render_customer)
                .collect::<String>(),
        )
    }

    fn render_empty(&self) -> Fragment {
        render::empty_fragment("bi-people", "No se encontraron clientes recientes")
    }

    /// The API answers 404 when there are no customers yet.
    fn recover(&self, error: &ApiError) -> Option<RecentCustomers> {
        (error.status() == Some(404)).then(RecentCustomers::default)
    }
}
