//! Wire models of the trip service
//!
//! Typed representations of the closest-departures and trip-details
//! responses, plus their conversion into the domain's stop sequence.

use chrono::{DateTime, Utc};
use domain::{GeoPoint, PlannedTrip, StopSequence, StopVisit, TimePoint, TripQuery, parse_point};
use serde::{Deserialize, Serialize};

use crate::error::TransitError;

/// A latitude/longitude pair as sent by the service
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Coordinates {
    /// Convert to a validated point
    pub fn to_point(self) -> Result<GeoPoint, TransitError> {
        GeoPoint::new(self.latitude, self.longitude)
            .map_err(|e| TransitError::ParseError(format!("stop coordinates: {e}")))
    }
}

/// A stop with its arrival and departure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopTime {
    /// Stop name
    pub name: String,
    /// Stop location
    pub coordinates: Coordinates,
    /// Arrival at the stop
    pub arrival_time: DateTime<Utc>,
    /// Departure from the stop
    pub departure_time: DateTime<Utc>,
}

impl StopTime {
    fn into_visit(
        self,
        route_id: &str,
        headsign: &str,
        trip_id: &str,
    ) -> Result<StopVisit, TransitError> {
        Ok(StopVisit {
            position: self.coordinates.to_point()?,
            name: self.name,
            arrival: TimePoint::new(self.arrival_time),
            departure: TimePoint::new(self.departure_time),
            route_id: route_id.to_string(),
            headsign: headsign.to_string(),
            trip_id: Some(trip_id.to_string()),
        })
    }
}

/// Query parameters echoed back in the response metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameters {
    /// `lat,lon` of the start
    pub start_coordinates: String,
    /// `lat,lon` of the end
    pub end_coordinates: String,
    /// Departure instant as sent
    pub start_time: String,
    /// Result limit as sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u8>,
}

/// Metadata attached to every response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Path of the request
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// City the request was made for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Echoed query parameters (closest departures only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<QueryParameters>,
    /// Requested trip (trip details only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
}

/// One departure: the stop where a trip can be boarded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Departure {
    /// Trip identifier
    pub trip_id: String,
    /// Line identifier
    pub route_id: String,
    /// Direction shown on the vehicle
    pub trip_headsign: String,
    /// Stop of the departure
    pub stop: StopTime,
}

/// Response of the closest-departures endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeparturesResponse {
    /// Request metadata
    #[serde(default)]
    pub metadata: ResponseMetadata,
    /// Departures in the order the service ranked them
    pub departures: Vec<Departure>,
}

impl DeparturesResponse {
    /// Convert into a stop sequence, keeping the response order
    ///
    /// A single invalid entry fails the whole conversion.
    pub fn to_stop_sequence(&self) -> Result<StopSequence, TransitError> {
        self.departures
            .iter()
            .map(|d| {
                d.stop
                    .clone()
                    .into_visit(&d.route_id, &d.trip_headsign, &d.trip_id)
            })
            .collect::<Result<Vec<_>, _>>()
            .map(StopSequence::new)
    }

    /// Rebuild the query from the echoed parameters together with the stops
    pub fn to_planned_trip(&self) -> Result<PlannedTrip, TransitError> {
        let params = self
            .metadata
            .query_parameters
            .as_ref()
            .ok_or_else(|| TransitError::ParseError("metadata.query_parameters missing".to_string()))?;

        let start = parse_pair(&params.start_coordinates)?;
        let end = parse_pair(&params.end_coordinates)?;
        let departure = DateTime::parse_from_rfc3339(&params.start_time)
            .map_err(|e| TransitError::ParseError(format!("start_time: {e}")))?
            .with_timezone(&Utc);

        let query = match params.limit {
            Some(limit) => TripQuery::with_limit(start, end, TimePoint::new(departure), limit),
            None => TripQuery::new(start, end, TimePoint::new(departure)),
        };

        Ok(PlannedTrip {
            query,
            stops: self.to_stop_sequence()?,
        })
    }
}

fn parse_pair(text: &str) -> Result<GeoPoint, TransitError> {
    let (lat, lon) = text
        .split_once(',')
        .ok_or_else(|| TransitError::ParseError(format!("expected lat,lon: {text}")))?;
    parse_point(lat, lon).map_err(|e| TransitError::ParseError(e.to_string()))
}

/// A trip with every stop it serves
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDetails {
    /// Trip identifier
    pub trip_id: String,
    /// Line identifier
    pub route_id: String,
    /// Direction shown on the vehicle
    pub trip_headsign: String,
    /// Stops in visit order
    pub stops: Vec<StopTime>,
}

/// Response of the trip-details endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDetailsResponse {
    /// Request metadata
    #[serde(default)]
    pub metadata: ResponseMetadata,
    /// The trip
    pub trip_details: TripDetails,
}

impl TripDetailsResponse {
    /// Convert into a stop sequence in which every visit carries the trip's line and headsign
    pub fn to_stop_sequence(&self) -> Result<StopSequence, TransitError> {
        let trip = &self.trip_details;
        trip.stops
            .iter()
            .cloned()
            .map(|stop| stop.into_visit(&trip.route_id, &trip.trip_headsign, &trip.trip_id))
            .collect::<Result<Vec<_>, _>>()
            .map(StopSequence::new)
    }
}

/// Error body of a failed request
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl ErrorBody {
    /// Extract the error text from a response body, if it has one
    pub(crate) fn message_from(body: &str) -> Option<String> {
        let parsed: Self = serde_json::from_str(body).ok()?;
        parsed
            .error
            .or(parsed.message)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Parse a closest-departures response body
pub fn parse_departures_response(body: &str) -> Result<DeparturesResponse, TransitError> {
    serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))
}

/// Parse a trip-details response body
pub fn parse_trip_response(body: &str) -> Result<TripDetailsResponse, TransitError> {
    serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPARTURES: &str = r#"{
        "metadata": {
            "self": "/public_transport/city/Wroclaw/closest_departures?start_coordinates=51.1090,17.0410&end_coordinates=51.1045,17.0285&start_time=2025-04-02T08:30:00Z&limit=2",
            "city": "Wroclaw",
            "query_parameters": {
                "start_coordinates": "51.1090,17.0410",
                "end_coordinates": "51.1045,17.0285",
                "start_time": "2025-04-02T08:30:00Z",
                "limit": 2
            }
        },
        "departures": [
            {
                "trip_id": "3_14613060",
                "route_id": "A",
                "trip_headsign": "KOSZAROWA (Szpital)",
                "stop": {
                    "name": "Plac Grunwaldzki",
                    "coordinates": { "latitude": 51.1092, "longitude": 17.0415 },
                    "arrival_time": "2025-04-02T08:34:00Z",
                    "departure_time": "2025-04-02T08:35:00Z"
                }
            },
            {
                "trip_id": "3_14613109",
                "route_id": "C",
                "trip_headsign": "Dworzec Główny",
                "stop": {
                    "name": "Renoma",
                    "coordinates": { "latitude": 51.1040, "longitude": 17.0280 },
                    "arrival_time": "2025-04-02T08:39:00Z",
                    "departure_time": "2025-04-02T08:40:00Z"
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_departures_keeps_order() {
        let response = parse_departures_response(DEPARTURES).unwrap();
        let stops = response.to_stop_sequence().unwrap();

        assert_eq!(stops.len(), 2);
        let names: Vec<&str> = stops.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, ["Plac Grunwaldzki", "Renoma"]);
        let first = &stops.visits()[0];
        assert_eq!(first.route_id, "A");
        assert_eq!(first.headsign, "KOSZAROWA (Szpital)");
        assert_eq!(first.trip_id.as_deref(), Some("3_14613060"));
        assert_eq!(first.departure.to_wire(), "2025-04-02T08:35:00Z");
    }

    #[test]
    fn test_metadata_is_optional() {
        let response = parse_departures_response(r#"{ "departures": [] }"#).unwrap();
        assert_eq!(response.metadata, ResponseMetadata::default());
        assert!(response.to_stop_sequence().unwrap().is_empty());
        assert!(response.to_planned_trip().is_err());
    }

    #[test]
    fn test_planned_trip_from_metadata() {
        let trip = parse_departures_response(DEPARTURES)
            .unwrap()
            .to_planned_trip()
            .unwrap();

        assert_eq!(trip.query.start().to_query_pair(), "51.10900,17.04100");
        assert_eq!(trip.query.end().to_query_pair(), "51.10450,17.02850");
        assert_eq!(trip.query.departure().to_wire(), "2025-04-02T08:30:00Z");
        assert_eq!(trip.query.limit(), 2);
        assert_eq!(trip.stops.len(), 2);
    }

    #[test]
    fn test_bad_time_fails_whole_response() {
        let body = DEPARTURES.replace("2025-04-02T08:39:00Z", "twenty to nine");
        assert!(matches!(
            parse_departures_response(&body),
            Err(TransitError::ParseError(_))
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_fail_conversion() {
        let body = DEPARTURES.replace("51.1040", "151.1040");
        let response = parse_departures_response(&body).unwrap();
        assert!(matches!(
            response.to_stop_sequence(),
            Err(TransitError::ParseError(_))
        ));
    }

    #[test]
    fn test_parse_trip_details() {
        let body = r#"{
            "metadata": { "self": "/public_transport/city/wroclaw/trip/3_14613060", "city": "wroclaw", "trip_id": "3_14613060" },
            "trip_details": {
                "trip_id": "3_14613060",
                "route_id": "A",
                "trip_headsign": "KRZYKI",
                "stops": [
                    { "name": "Plac Grunwaldzki", "coordinates": { "latitude": 51.1092, "longitude": 17.0415 },
                      "arrival_time": "2025-04-02T08:34:00Z", "departure_time": "2025-04-02T08:35:00Z" },
                    { "name": "Renoma", "coordinates": { "latitude": 51.1040, "longitude": 17.0280 },
                      "arrival_time": "2025-04-02T08:39:00Z", "departure_time": "2025-04-02T08:40:00Z" },
                    { "name": "Dominikański", "coordinates": { "latitude": 51.1099, "longitude": 17.0335 },
                      "arrival_time": "2025-04-02T08:44:00Z", "departure_time": "2025-04-02T08:45:00Z" }
                ]
            }
        }"#;

        let response = parse_trip_response(body).unwrap();
        assert_eq!(response.metadata.trip_id.as_deref(), Some("3_14613060"));

        let stops = response.to_stop_sequence().unwrap();
        assert_eq!(stops.len(), 3);
        assert!(stops.iter().all(|v| v.route_id == "A" && v.headsign == "KRZYKI"));
        assert_eq!(stops.visits()[2].name, "Dominikański");
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_departures_response("not json").is_err());
        assert!(parse_trip_response("{}").is_err());
    }

    #[test]
    fn test_error_body_message() {
        assert_eq!(
            ErrorBody::message_from(r#"{"error": "City not supported"}"#).as_deref(),
            Some("City not supported")
        );
        assert_eq!(
            ErrorBody::message_from(r#"{"message": "Trip not found"}"#).as_deref(),
            Some("Trip not found")
        );
        assert_eq!(ErrorBody::message_from(r#"{"error": ""}"#), None);
        assert_eq!(ErrorBody::message_from("<html>oops</html>"), None);
    }
}
