//! Geographic point value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of decimal places used whenever a coordinate is shown or sent
pub const COORDINATE_DECIMALS: usize = 5;

/// A geographic point with latitude and longitude
///
/// Deserialization goes through [`GeoPoint::new`], so out-of-range input is
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = InvalidCoordinates;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

impl GeoPoint {
    /// Create a new point with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if latitude is not in [-90, 90]
    /// or longitude is not in [-180, 180]. NaN is rejected as well.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a point without validation (for trusted constants)
    ///
    /// Caller must ensure latitude is in [-90, 90] and longitude in [-180, 180]
    #[must_use]
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// The point with both components rounded to five decimal places
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            latitude: round_coordinate(self.latitude),
            longitude: round_coordinate(self.longitude),
        }
    }

    /// Latitude formatted with five decimal places
    #[must_use]
    pub fn latitude_text(&self) -> String {
        format!("{:.prec$}", self.latitude, prec = COORDINATE_DECIMALS)
    }

    /// Longitude formatted with five decimal places
    #[must_use]
    pub fn longitude_text(&self) -> String {
        format!("{:.prec$}", self.longitude, prec = COORDINATE_DECIMALS)
    }

    /// `lat,lon` pair as used in query strings
    #[must_use]
    pub fn to_query_pair(&self) -> String {
        format!("{},{}", self.latitude_text(), self.longitude_text())
    }
}

/// Round a coordinate component to five decimal places
#[must_use]
pub fn round_coordinate(value: f64) -> f64 {
    const SCALE: f64 = 100_000.0;
    (value * SCALE).round() / SCALE
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude_text(), self.longitude_text())
    }
}

/// Well-known points used for defaults
impl GeoPoint {
    /// Wrocław city center
    #[must_use]
    pub const fn wroclaw() -> Self {
        Self::new_unchecked(51.107_883, 17.038_538)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_coordinates() {
        let point = GeoPoint::new(51.109, 17.041).expect("valid coordinates");
        assert!((point.latitude() - 51.109).abs() < f64::EPSILON);
        assert!((point.longitude() - 17.041).abs() < f64::EPSILON);
    }

    #[test]
    fn test_boundary_coordinates() {
        assert!(GeoPoint::new(90.0, 180.0).is_ok());
        assert!(GeoPoint::new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_invalid_coordinates() {
        assert!(GeoPoint::new(91.0, 0.0).is_err());
        assert!(GeoPoint::new(-91.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, 181.0).is_err());
        assert!(GeoPoint::new(0.0, -181.0).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_text_uses_five_decimals() {
        let point = GeoPoint::new(51.109_012_34, 17.041).expect("valid");
        assert_eq!(point.latitude_text(), "51.10901");
        assert_eq!(point.longitude_text(), "17.04100");
        assert_eq!(point.to_query_pair(), "51.10901,17.04100");
    }

    #[test]
    fn test_rounded() {
        let point = GeoPoint::new(51.109_016, -17.041_004).expect("valid");
        let rounded = point.rounded();
        assert!((rounded.latitude() - 51.109_02).abs() < 1e-9);
        assert!((rounded.longitude() + 17.041).abs() < 1e-9);
    }

    #[test]
    fn test_display() {
        let point = GeoPoint::new(51.109, 17.041).expect("valid");
        assert_eq!(point.to_string(), "51.10900, 17.04100");
    }

    #[test]
    fn test_serialization() {
        let point = GeoPoint::new(51.109, 17.041).expect("valid");
        let json = serde_json::to_string(&point).expect("serialize");
        assert!(json.contains("51.109"));

        let deserialized: GeoPoint = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(point, deserialized);
    }

    #[test]
    fn test_deserialization_rejects_out_of_range() {
        let err = serde_json::from_str::<GeoPoint>(r#"{"latitude":999.0,"longitude":-500.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid coordinates"));
        assert!(serde_json::from_str::<GeoPoint>(r#"{"latitude":51.1,"longitude":181.0}"#).is_err());
    }
}
