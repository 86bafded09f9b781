//! Response shapes of the analytics API.
//!
//! Every field the dashboard reads is optional: a missing field is an
//! empty-state for the panel, not a decoding failure.

use serde::{Deserialize, Serialize};

/// `GET /status`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub cassandra_connected: Option<bool>,
    pub status: Option<String>,
    pub message: Option<String>,
}

/// `GET /customers/global_recent`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentCustomers {
    pub global_recent_customers: Option<Vec<CustomerSummary>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub city: Option<String>,
    /// ISO-8601 instant, newest first in the list.
    pub registration_timestamp: Option<String>,
}

/// `GET /products/new_count`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProductCount {
    pub period: Option<String>,
    pub new_products_count: Option<i64>,
    /// Compact `YYYYMMDDHH...` bucket token.
    pub time_bucket: Option<String>,
}

/// `GET /products/recent_by_category/{key}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentProducts {
    pub product_subcategory_key: Option<i64>,
    pub category_name: Option<String>,
    pub recent_products: Option<Vec<ProductSummary>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub english_product_name: Option<String>,
    pub color: Option<String>,
    pub addition_timestamp: Option<String>,
}

/// `GET /customers/geo_distribution_hourly_by_country/{country}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoDistributionReport {
    pub country_name: Option<String>,
    pub hour_bucket: Option<String>,
    pub total_new_customers_in_hour_for_country: Option<i64>,
    pub distribution_by_city: Option<Vec<CityCount>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCount {
    pub city: Option<String>,
    pub new_customers_count: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_decode_as_none() {
        let report: GeoDistributionReport = serde_json::from_value(json!({})).unwrap();
        assert_eq!(report, GeoDistributionReport::default());
    }

    #[test]
    fn test_null_list_decodes_as_none() {
        let customers: RecentCustomers =
            serde_json::from_value(json!({ "global_recent_customers": null })).unwrap();
        assert!(customers.global_recent_customers.is_none());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let products: RecentProducts = serde_json::from_value(json!({
            "product_subcategory_key": 2,
            "category_name": "Road Bikes",
            "recent_products": [{
                "product_alternate_key": "BK-R93R-62",
                "english_product_name": "Road-150 Red, 62",
                "category_key": 2,
                "category_name": "Road Bikes",
                "color": "Red",
                "addition_timestamp": "2024-03-15T10:12:00"
            }]
        }))
        .unwrap();

        let list = products.recent_products.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].color.as_deref(), Some("Red"));
    }

    #[test]
    fn test_wrong_field_type_is_an_error() {
        let result: Result<NewProductCount, _> =
            serde_json::from_value(json!({ "new_products_count": "many" }));
        assert!(result.is_err());
    }
}
