//! Application configuration
//!
//! Split into sections:
//! - `map`: display timezone and viewport defaults
//! - `trip_service`: trip-lookup service endpoint and limits
//! - `logging`: log filter and output format
//!
//! Values are merged from defaults, an optional `tripmap.toml` and
//! `TRIPMAP_*` environment variables. Nested keys use a double underscore,
//! e.g. `TRIPMAP_TRIP_SERVICE__BASE_URL`.

mod map;

use std::path::Path;

use application::SessionConfig;
use integration_transit::TransitConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::telemetry::LoggingConfig;

pub use map::{CenterConfig, MAX_ZOOM, MapAppConfig};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TRIPMAP";

/// Base name of the optional configuration file
pub const CONFIG_FILE: &str = "tripmap";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Map view settings
    #[serde(default)]
    pub map: MapAppConfig,

    /// Trip-lookup service settings
    #[serde(default)]
    pub trip_service: TransitConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `tripmap.*` in the working directory (if
    /// present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name(CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .add_source(file)
            // Override with environment variables (e.g., TRIPMAP_MAP__TIMEZONE)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        debug!(
            base_url = %loaded.trip_service.base_url,
            city = %loaded.trip_service.city,
            timezone = %loaded.map.timezone,
            "Configuration loaded"
        );
        Ok(loaded)
    }

    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.map.validate().map_err(|e| format!("map: {e}"))?;
        self.trip_service
            .validate()
            .map_err(|e| format!("trip_service: {e}"))?;
        self.logging.validate().map_err(|e| format!("logging: {e}"))?;
        Ok(())
    }

    /// Session settings derived from the map and trip service sections
    pub fn session_config(&self) -> Result<SessionConfig, String> {
        let default_center = self
            .map
            .default_center
            .to_point()
            .ok_or_else(|| "map: default_center is out of range".to_string())?;

        Ok(SessionConfig {
            display_timezone: self.map.display_timezone()?,
            default_center,
            default_zoom: self.map.default_zoom,
            single_marker_zoom: self.map.single_marker_zoom,
            fit_padding: self.map.fit_padding,
            result_limit: self.trip_service.result_limit,
        })
    }
}
