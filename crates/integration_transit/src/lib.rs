//! Trip service integration
//!
//! HTTP client for the public transport trip-lookup service. Two endpoints
//! are used, both under `/public_transport/city/{city}`:
//!
//! - `closest_departures?start_coordinates=..&end_coordinates=..&start_time=..&limit=..`
//! - `trip/{trip_id}`
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern.
//! [`TripServiceClient`] defines the interface, implemented by
//! [`HttpTripServiceClient`]. Wire models convert into the domain's
//! [`domain::StopSequence`] and keep the service's ordering.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{HttpTripServiceClient, TransitConfig, TripServiceClient};
//!
//! let client = HttpTripServiceClient::new(&TransitConfig::default())?;
//! let response = client.closest_departures(&query).await?;
//! let stops = response.to_stop_sequence()?;
//! ```

mod client;
mod config;
mod error;
mod models;
mod sample;

pub use client::{HttpTripServiceClient, TripServiceClient};
pub use config::{MAX_RESULT_LIMIT, TransitConfig};
pub use error::TransitError;
pub use models::{
    Coordinates, Departure, DeparturesResponse, QueryParameters, ResponseMetadata, StopTime,
    TripDetails, TripDetailsResponse, parse_departures_response, parse_trip_response,
};
pub use sample::{SAMPLE_DEPARTURES_JSON, sample_trip};
