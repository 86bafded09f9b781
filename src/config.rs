//! Application configuration.

use crate::consts::dashboard_consts::{API_BASE_URL, RECENT_CUSTOMERS_LIMIT, polling};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{fs, path::Path};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the analytics API, without a trailing slash.
    pub api_base_url: String,
    /// Interval between two refreshes of the same panel.
    pub refresh_interval_ms: u64,
    /// How many customers the recent-customers panel asks for.
    pub recent_customers_limit: u32,
    /// Upper bound on a whole request. Unbounded when absent.
    pub request_timeout_secs: Option<u64>,
    /// Where to write the rendered dashboard page.
    pub output_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: API_BASE_URL.to_string(),
            refresh_interval_ms: polling::REFRESH_INTERVAL_MS,
            recent_customers_limit: RECENT_CUSTOMERS_LIMIT,
            request_timeout_secs: None,
            output_path: None,
        }
    }
}

impl Config {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Rejects values the dashboard cannot poll with.
    ///
    /// # Errors
    /// Returns an `std::io::Error` of kind `InvalidInput` naming the bad field.
    pub fn validate(&self) -> Result<(), std::io::Error> {
        let invalid = |msg: &str| std::io::Error::new(std::io::ErrorKind::InvalidInput, msg);
        if self.api_base_url.trim().is_empty() {
            return Err(invalid("api_base_url must not be empty"));
        }
        if self.refresh_interval_ms == 0 {
            return Err(invalid("refresh_interval_ms must be greater than zero"));
        }
        if self.recent_customers_limit == 0 {
            return Err(invalid("recent_customers_limit must be greater than zero"));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(invalid("request_timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Default location of the configuration file: `~/.analytics-dashboard/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine the home directory",
        )
    })?;
    Ok(home.join(".analytics-dashboard").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            api_base_url: "http://analytics:5000/api/v1".to_string(),
            request_timeout_secs: Some(15),
            ..Config::default()
        };
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let result = Config::default().save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Fields missing from the file fall back to their defaults.
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "recent_customers_limit": 10 }"#).unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.recent_customers_limit, 10);
        assert_eq!(config.api_base_url, API_BASE_URL);
        assert_eq!(config.refresh_interval(), Duration::from_secs(30));
        assert_eq!(config.request_timeout(), None);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_interval_and_limit() {
        assert!(Config::default().validate().is_ok());

        let zero_interval = Config {
            refresh_interval_ms: 0,
            ..Config::default()
        };
        assert!(zero_interval.validate().is_err());

        let zero_limit = Config {
            recent_customers_limit: 0,
            ..Config::default()
        };
        let err = zero_limit.validate().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let zero_timeout = Config {
            request_timeout_secs: Some(0),
            ..Config::default()
        };
        let err = zero_timeout.validate().unwrap_err();
        assert!(err.to_string().contains("request_timeout_secs"));

        let bounded = Config {
            request_timeout_secs: Some(1),
            ..Config::default()
        };
        assert!(bounded.validate().is_ok());
    }
}
