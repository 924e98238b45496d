//! Trip form - the text fields the user reads and edits

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{Endpoint, GeoPoint};

/// An editable text field of the trip form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    /// Start latitude
    StartLat,
    /// Start longitude
    StartLng,
    /// End latitude
    EndLat,
    /// End longitude
    EndLng,
    /// Departure date and time
    Departure,
}

impl FormField {
    /// Latitude and longitude fields of an endpoint
    #[must_use]
    pub const fn coordinates_of(endpoint: Endpoint) -> (Self, Self) {
        match endpoint {
            Endpoint::Start => (Self::StartLat, Self::StartLng),
            Endpoint::End => (Self::EndLat, Self::EndLng),
        }
    }

    /// The endpoint a coordinate field belongs to
    #[must_use]
    pub const fn endpoint(&self) -> Option<Endpoint> {
        match self {
            Self::StartLat | Self::StartLng => Some(Endpoint::Start),
            Self::EndLat | Self::EndLng => Some(Endpoint::End),
            Self::Departure => None,
        }
    }

    /// Field name as used in commands
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::StartLat => "start_lat",
            Self::StartLng => "start_lng",
            Self::EndLat => "end_lat",
            Self::EndLng => "end_lng",
            Self::Departure => "departure",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "start_lat" | "startlat" => Ok(Self::StartLat),
            "start_lng" | "startlng" | "start_lon" => Ok(Self::StartLng),
            "end_lat" | "endlat" => Ok(Self::EndLat),
            "end_lng" | "endlng" | "end_lon" => Ok(Self::EndLng),
            "departure" | "start_time" | "starttime" => Ok(Self::Departure),
            _ => Err(format!("Unknown form field: {s}")),
        }
    }
}

/// Raw text of every form field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripForm {
    start_lat: String,
    start_lng: String,
    end_lat: String,
    end_lng: String,
    departure: String,
}

impl TripForm {
    /// Form with empty coordinates and the given departure text
    pub fn new(departure: impl Into<String>) -> Self {
        Self {
            departure: departure.into(),
            ..Self::default()
        }
    }

    /// Current text of a field
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::StartLat => &self.start_lat,
            FormField::StartLng => &self.start_lng,
            FormField::EndLat => &self.end_lat,
            FormField::EndLng => &self.end_lng,
            FormField::Departure => &self.departure,
        }
    }

    /// Overwrite the text of a field
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::StartLat => &mut self.start_lat,
            FormField::StartLng => &mut self.start_lng,
            FormField::EndLat => &mut self.end_lat,
            FormField::EndLng => &mut self.end_lng,
            FormField::Departure => &mut self.departure,
        };
        *slot = value.into();
    }

    /// Write a point into an endpoint's coordinate fields with five decimals
    pub fn set_point(&mut self, endpoint: Endpoint, point: GeoPoint) {
        let (lat, lng) = FormField::coordinates_of(endpoint);
        self.set(lat, point.latitude_text());
        self.set(lng, point.longitude_text());
    }

    /// Latitude and longitude text of an endpoint
    #[must_use]
    pub fn coordinates(&self, endpoint: Endpoint) -> (&str, &str) {
        let (lat, lng) = FormField::coordinates_of(endpoint);
        (self.get(lat), self.get(lng))
    }

    /// Empty an endpoint's coordinate fields
    pub fn clear_point(&mut self, endpoint: Endpoint) {
        let (lat, lng) = FormField::coordinates_of(endpoint);
        self.set(lat, String::new());
        self.set(lng, String::new());
    }

    /// Departure text
    #[must_use]
    pub fn departure(&self) -> &str {
        &self.departure
    }
}
