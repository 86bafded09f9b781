//! Document model
//!
//! Owned stand-ins for the page elements the dashboard reads and writes:
//! five panel containers and three filter controls, each addressed by its
//! fixed element identifier. The document renders itself as a complete HTML
//! page.

use crate::consts::dashboard_consts::elements;
use crate::panels::PanelKind;
use crate::render::{Fragment, escape_html};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::io;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    /// The requested value is not one of the control's options.
    #[error("'{value}' is not an option of {element} (expected one of: {options})")]
    UnknownOption {
        element: &'static str,
        value: String,
        options: String,
    },
}

/// A container whose content is replaced wholesale by a panel refresh.
pub trait RenderTarget: Send + Sync {
    /// Toggle the loading indicator.
    fn set_loading(&self, loading: bool);

    /// Replace all prior content.
    fn set_content(&self, fragment: Fragment);
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
struct ContainerState {
    loading: bool,
    content: Fragment,
}

/// Shared handle to one panel container.
#[derive(Debug, Clone)]
pub struct Container {
    id: &'static str,
    state: Arc<Mutex<ContainerState>>,
}

impl Container {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            state: Arc::new(Mutex::new(ContainerState::default())),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).loading
    }

    pub fn content(&self) -> Fragment {
        lock(&self.state).content.clone()
    }

    fn render(&self) -> String {
        let state = lock(&self.state);
        let class = if state.loading {
            format!("card-body {}", elements::LOADING_CLASS)
        } else {
            "card-body".to_string()
        };
        format!(
            r#"<div id="{}" class="{}">{}</div>"#,
            self.id, class, state.content
        )
    }
}

impl RenderTarget for Container {
    fn set_loading(&self, loading: bool) {
        lock(&self.state).loading = loading;
    }

    fn set_content(&self, fragment: Fragment) {
        lock(&self.state).content = fragment;
    }
}

/// A selectable option: machine value plus display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Default)]
struct SelectState {
    options: Vec<SelectOption>,
    selected: usize,
}

/// Shared handle to one filter dropdown.
#[derive(Debug, Clone)]
pub struct SelectControl {
    id: &'static str,
    state: Arc<Mutex<SelectState>>,
}

impl SelectControl {
    pub fn new(id: &'static str) -> Self {
        Self {
            id,
            state: Arc::new(Mutex::new(SelectState::default())),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Replace all options. The first option becomes the selection.
    pub fn set_options(&self, options: Vec<SelectOption>) {
        let mut state = lock(&self.state);
        state.options = options;
        state.selected = 0;
    }

    pub fn options(&self) -> Vec<SelectOption> {
        lock(&self.state).options.clone()
    }

    /// Current value, or an empty string when the control has no options.
    pub fn value(&self) -> String {
        let state = lock(&self.state);
        state
            .options
            .get(state.selected)
            .map(|o| o.value.clone())
            .unwrap_or_default()
    }

    pub fn select(&self, value: &str) -> Result<(), DocumentError> {
        let mut state = lock(&self.state);
        match state.options.iter().position(|o| o.value == value) {
            Some(index) => {
                state.selected = index;
                Ok(())
            }
            None => Err(DocumentError::UnknownOption {
                element: self.id,
                value: value.to_string(),
                options: state
                    .options
                    .iter()
                    .map(|o| o.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    fn render(&self) -> String {
        let state = lock(&self.state);
        let options: String = state
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| {
                format!(
                    r#"<option value="{}"{}>{}</option>"#,
                    escape_html(&o.value),
                    if i == state.selected { " selected" } else { "" },
                    escape_html(&o.label)
                )
            })
            .collect();
        format!(
            r#"<select id="{}" class="form-select form-select-sm">{}</select>"#,
            self.id, options
        )
    }
}

/// Filter values read from the controls at the start of each refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub period: String,
    pub category_key: String,
    pub country: String,
}

/// Periods accepted by the new-products endpoint, as shipped in the page shell.
fn period_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("hourly", "Última hora"),
        SelectOption::new("daily", "Último día"),
        SelectOption::new("5min", "Últimos 5 minutos"),
    ]
}

/// The dashboard page: five containers and three filter controls.
#[derive(Debug, Clone)]
pub struct Document {
    api_status: Container,
    recent_customers: Container,
    new_products: Container,
    products_by_category: Container,
    geo_distribution: Container,
    period_select: SelectControl,
    category_select: SelectControl,
    country_select: SelectControl,
}

impl Document {
    pub fn new() -> Self {
        let period_select = SelectControl::new(elements::PERIOD_SELECT);
        period_select.set_options(period_options());
        Self {
            api_status: Container::new(elements::API_STATUS),
            recent_customers: Container::new(elements::RECENT_CUSTOMERS),
            new_products: Container::new(elements::NEW_PRODUCTS),
            products_by_category: Container::new(elements::PRODUCTS_BY_CATEGORY),
            geo_distribution: Container::new(elements::GEO_DISTRIBUTION),
            period_select,
            category_select: SelectControl::new(elements::CATEGORY_SELECT),
            country_select: SelectControl::new(elements::COUNTRY_SELECT),
        }
    }

    pub fn container(&self, panel: PanelKind) -> &Container {
        match panel {
            PanelKind::Status => &self.api_status,
            PanelKind::RecentCustomers => &self.recent_customers,
            PanelKind::NewProducts => &self.new_products,
            PanelKind::ProductsByCategory => &self.products_by_category,
            PanelKind::GeoDistribution => &self.geo_distribution,
        }
    }

    pub fn period_select(&self) -> &SelectControl {
        &self.period_select
    }

    pub fn category_select(&self) -> &SelectControl {
        &self.category_select
    }

    pub fn country_select(&self) -> &SelectControl {
        &self.country_select
    }

    /// Read the current filter values. Nothing is cached between calls.
    pub fn filter_selection(&self) -> FilterSelection {
        FilterSelection {
            period: self.period_select.value(),
            category_key: self.category_select.value(),
            country: self.country_select.value(),
        }
    }

    /// Render the whole page. `refresh_secs` adds a meta refresh so a browser
    /// showing a written snapshot follows the polling cadence.
    pub fn render_page(&self, refresh_secs: Option<u64>) -> String {
        let meta_refresh = refresh_secs
            .map(|secs| format!(r#"<meta http-equiv="refresh" content="{}">"#, secs))
            .unwrap_or_default();
        format!(
            r#"<!DOCTYPE html>
<html lang="es">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{meta_refresh}
<title>Dashboard de Análisis en Tiempo Real</title>
<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
<link href="https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css" rel="stylesheet">
<style>
.loading {{ opacity: 0.5; pointer-events: none; }}
.stats-value {{ font-size: 2rem; font-weight: 600; }}
.product-card:hover {{ background-color: #f8f9fa; }}
</style>
</head>
<body class="bg-light">
<div class="container py-4">
<h1 class="h3 mb-4"><i class="bi bi-graph-up"></i> Dashboard de Análisis en Tiempo Real</h1>
<div class="row g-4">
<div class="col-md-4"><div class="card"><div class="card-header">Estado del Sistema</div>{status}</div></div>
<div class="col-md-4"><div class="card"><div class="card-header">Clientes Recientes</div>{customers}</div></div>
<div class="col-md-4"><div class="card"><div class="card-header d-flex justify-content-between align-items-center">Productos Nuevos {period}</div>{new_products}</div></div>
<div class="col-md-6"><div class="card"><div class="card-header d-flex justify-content-between align-items-center">Productos por Categoría {category}</div>{by_category}</div></div>
<div class="col-md-6"><div class="card"><div class="card-header d-flex justify-content-between align-items-center">Distribución Geográfica {country}</div>{geo}</div></div>
</div>
</div>
</body>
</html>
"#,
            meta_refresh = meta_refresh,
            status = self.api_status.render(),
            customers = self.recent_customers.render(),
            period = self.period_select.render(),
            new_products = self.new_products.render(),
            category = self.category_select.render(),
            by_category = self.products_by_category.render(),
            country = self.country_select.render(),
            geo = self.geo_distribution.render(),
        )
    }

    /// Write the rendered page, creating parent directories as needed.
    pub async fn save_page(&self, path: &Path, refresh_secs: Option<u64>) -> Result<(), io::Error> {
        let page = self.render_page(refresh_secs);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        tokio::fs::write(path, page).await
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
