//! Map view configuration

use application::{DEFAULT_FIT_PADDING, DEFAULT_ZOOM, SINGLE_MARKER_ZOOM};
use chrono_tz::Tz;
use domain::GeoPoint;
use serde::{Deserialize, Serialize};

/// Highest zoom level the map tiles support
pub const MAX_ZOOM: u8 = 19;

/// Geographic location configuration (latitude/longitude pair)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl CenterConfig {
    /// Convert to a domain `GeoPoint`
    ///
    /// Returns `None` if coordinates are invalid.
    #[must_use]
    pub fn to_point(&self) -> Option<GeoPoint> {
        GeoPoint::new(self.latitude, self.longitude).ok()
    }
}

impl Default for CenterConfig {
    fn default() -> Self {
        let wroclaw = GeoPoint::wroclaw();
        Self {
            latitude: wroclaw.latitude(),
            longitude: wroclaw.longitude(),
        }
    }
}

/// Map section of the application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapAppConfig {
    /// IANA timezone used to show and read local times
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Center of the initial view
    #[serde(default)]
    pub default_center: CenterConfig,

    /// Zoom of the initial view
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,

    /// Zoom used when a single marker is visible
    #[serde(default = "default_single_marker_zoom")]
    pub single_marker_zoom: u8,

    /// Share of the span added on each side when fitting the view
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f64,
}

fn default_timezone() -> String {
    "Europe/Warsaw".to_string()
}

const fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

const fn default_single_marker_zoom() -> u8 {
    SINGLE_MARKER_ZOOM
}

const fn default_fit_padding() -> f64 {
    DEFAULT_FIT_PADDING
}

impl Default for MapAppConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            default_center: CenterConfig::default(),
            default_zoom: default_zoom(),
            single_marker_zoom: default_single_marker_zoom(),
            fit_padding: default_fit_padding(),
        }
    }
}

impl MapAppConfig {
    /// Parsed display timezone
    pub fn display_timezone(&self) -> Result<Tz, String> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| format!("unknown timezone '{}': {e}", self.timezone))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.display_timezone()?;

        if self.default_center.to_point().is_none() {
            return Err(format!(
                "default_center ({}, {}) is out of range",
                self.default_center.latitude, self.default_center.longitude
            ));
        }

        if self.default_zoom > MAX_ZOOM || self.single_marker_zoom > MAX_ZOOM {
            return Err(format!("zoom levels must be {MAX_ZOOM} or less"));
        }

        if !self.fit_padding.is_finite() || self.fit_padding < 0.0 {
            return Err("fit_padding must be a non-negative number".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MapAppConfig::default();
        assert_eq!(config.timezone, "Europe/Warsaw");
        assert_eq!(config.default_zoom, 13);
        assert_eq!(config.single_marker_zoom, 15);
        assert!((config.fit_padding - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.default_center.to_point(), Some(GeoPoint::wroclaw()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_timezone() {
        let config = MapAppConfig {
            timezone: "Mars/Olympus".to_string(),
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("Mars/Olympus"));
    }

    #[test]
    fn test_invalid_center() {
        let config = MapAppConfig {
            default_center: CenterConfig {
                latitude: 95.0,
                longitude: 17.0,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zoom_and_padding_bounds() {
        let zoomed = MapAppConfig {
            single_marker_zoom: 25,
            ..Default::default()
        };
        assert!(zoomed.validate().is_err());

        let padded = MapAppConfig {
            fit_padding: -0.1,
            ..Default::default()
        };
        assert!(padded.validate().is_err());
    }
}
