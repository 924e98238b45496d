//! Trip service configuration

use serde::{Deserialize, Serialize};
use url::Url;

/// Upper bound for the per-request result limit
pub const MAX_RESULT_LIMIT: u8 = 50;

/// Configuration for the trip-lookup service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Base URL of the service (without the `/public_transport` prefix)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// City path segment sent with every request
    #[serde(default = "default_city")]
    pub city: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of departures requested
    #[serde(default = "default_result_limit")]
    pub result_limit: u8,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_city() -> String {
    "Wroclaw".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_result_limit() -> u8 {
    5
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            city: default_city(),
            timeout_secs: default_timeout_secs(),
            result_limit: default_result_limit(),
        }
    }
}

impl TransitConfig {
    /// Create a configuration suitable for testing against a local mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 5,
            result_limit: 3,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        let url = Url::parse(&self.base_url).map_err(|e| format!("base_url is invalid: {e}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("base_url must use http or https, got {}", url.scheme()));
        }

        if self.city.trim().is_empty() {
            return Err("city must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.result_limit == 0 {
            return Err("result_limit must be greater than 0".to_string());
        }

        if self.result_limit > MAX_RESULT_LIMIT {
            return Err(format!("result_limit must be {MAX_RESULT_LIMIT} or less"));
        }

        Ok(())
    }
}
