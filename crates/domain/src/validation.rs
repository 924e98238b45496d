//! Parsing of raw form text into typed values
//!
//! Every parser returns a `Result`; malformed input never panics.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::DomainError;
use crate::value_objects::{GeoPoint, TimePoint};

/// Naive formats accepted for the departure field, interpreted in local time
const LOCAL_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Coordinate axis, which decides the valid range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// -90 to 90
    Latitude,
    /// -180 to 180
    Longitude,
}

impl Axis {
    const fn limit(self) -> f64 {
        match self {
            Self::Latitude => 90.0,
            Self::Longitude => 180.0,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Latitude => "latitude",
            Self::Longitude => "longitude",
        }
    }
}

/// Parse one coordinate component
///
/// Surrounding whitespace is ignored. Non-numeric, non-finite and
/// out-of-range values are rejected.
pub fn parse_coordinate(text: &str, axis: Axis) -> Result<f64, DomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::missing(axis.name()));
    }

    let value: f64 = trimmed.parse().map_err(|_| {
        DomainError::InvalidCoordinate(format!("{} is not a number: {trimmed}", axis.name()))
    })?;

    if !value.is_finite() || value.abs() > axis.limit() {
        return Err(DomainError::InvalidCoordinate(format!(
            "{} out of range: {trimmed}",
            axis.name()
        )));
    }

    Ok(value)
}

/// Parse a latitude/longitude text pair into a point
pub fn parse_point(latitude: &str, longitude: &str) -> Result<GeoPoint, DomainError> {
    let lat = parse_coordinate(latitude, Axis::Latitude)?;
    let lon = parse_coordinate(longitude, Axis::Longitude)?;
    GeoPoint::new(lat, lon).map_err(|e| DomainError::InvalidCoordinate(e.to_string()))
}

/// Parse departure text into an absolute instant
///
/// RFC 3339 values keep their offset. Values without an offset are read as
/// local time in `tz`; in a DST overlap the earlier instant wins, and times
/// skipped by a DST jump are rejected.
pub fn parse_time(text: &str, tz: Tz) -> Result<TimePoint, DomainError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DomainError::missing("departure time"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(TimePoint::new(dt.with_timezone(&Utc)));
    }

    let naive = LOCAL_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| DomainError::InvalidDateTime(trimmed.to_string()))?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|local| TimePoint::new(local.with_timezone(&Utc)))
        .ok_or_else(|| {
            DomainError::InvalidDateTime(format!("{trimmed} does not exist in {}", tz.name()))
        })
}
