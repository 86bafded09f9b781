//! Filter dropdown initialization.

use crate::document::{Document, SelectOption};

/// Product subcategories offered by the category filter.
pub fn category_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("1", "Mountain Bikes"),
        SelectOption::new("2", "Road Bikes"),
        SelectOption::new("3", "Touring Bikes"),
    ]
}

/// Countries offered by the geographic filter. Values are the names the API
/// expects; labels are shown to the user.
pub fn country_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new("United States", "Estados Unidos"),
        SelectOption::new("Canada", "Canadá"),
        SelectOption::new("Mexico", "México"),
    ]
}

/// Populate the category and country dropdowns. Must run before the first
/// refresh so every panel reads a valid default filter value.
pub fn initialize_selectors(document: &Document) {
    document.category_select().set_options(category_options());
    document.country_select().set_options(country_options());
}
