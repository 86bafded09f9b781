pub mod dashboard_consts {
    //! Dashboard Configuration Constants
    //!
    //! Defaults for the analytics API connection, the polling cadence and the
    //! element identifiers shared by the document model and the panels.

    // =============================================================================
    // API CONFIGURATION
    // =============================================================================

    /// Base URL of the analytics REST API when no override is configured.
    pub const API_BASE_URL: &str = "http://localhost:5000/api/v1";

    /// Number of customers requested by the recent-customers panel.
    pub const RECENT_CUSTOMERS_LIMIT: u32 = 5;

    /// HTTP transport configuration
    pub mod http {
        use std::time::Duration;

        /// Time allowed to establish a connection to the API (seconds)
        pub const CONNECT_TIMEOUT_SECS: u64 = 10;

        pub const fn connect_timeout() -> Duration {
            Duration::from_secs(CONNECT_TIMEOUT_SECS)
        }
    }

    // =============================================================================
    // POLLING CONFIGURATION
    // =============================================================================

    /// Polling cadence configuration
    pub mod polling {
        use std::time::Duration;

        /// Interval between two refreshes of the same panel (milliseconds)
        pub const REFRESH_INTERVAL_MS: u64 = 30_000;

        /// Helper function to get the refresh interval
        pub const fn refresh_interval() -> Duration {
            Duration::from_millis(REFRESH_INTERVAL_MS)
        }
    }

    /// Maximum number of buffered panel events
    pub const EVENT_QUEUE_SIZE: usize = 100;

    // =============================================================================
    // DOCUMENT ELEMENTS
    // =============================================================================

    /// Fixed element identifiers of the dashboard page
    pub mod elements {
        pub const API_STATUS: &str = "api-status";
        pub const RECENT_CUSTOMERS: &str = "recent-customers";
        pub const NEW_PRODUCTS: &str = "new-products";
        pub const PRODUCTS_BY_CATEGORY: &str = "products-by-category";
        pub const GEO_DISTRIBUTION: &str = "geo-distribution";

        pub const PERIOD_SELECT: &str = "period-select";
        pub const CATEGORY_SELECT: &str = "category-select";
        pub const COUNTRY_SELECT: &str = "country-select";

        /// CSS class toggled on a container while its request is outstanding
        pub const LOADING_CLASS: &str = "loading";
    }
}
