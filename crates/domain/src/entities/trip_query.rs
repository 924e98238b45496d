//! Trip query - what gets sent to the trip-lookup service

use serde::{Deserialize, Serialize};

use crate::entities::StopSequence;
use crate::value_objects::{GeoPoint, TimePoint};

/// Default number of results requested from the trip service
pub const DEFAULT_RESULT_LIMIT: u8 = 5;

/// A request for the stops between two points at a departure time
///
/// Built fresh for every submission and immutable afterwards. Coordinates are
/// rounded to five decimals on construction so the query matches what the
/// user saw in the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripQuery {
    start: GeoPoint,
    end: GeoPoint,
    departure: TimePoint,
    limit: u8,
}

impl TripQuery {
    /// Create a query with the default result limit
    #[must_use]
    pub fn new(start: GeoPoint, end: GeoPoint, departure: TimePoint) -> Self {
        Self::with_limit(start, end, departure, DEFAULT_RESULT_LIMIT)
    }

    /// Create a query with an explicit result limit (at least 1)
    #[must_use]
    pub fn with_limit(start: GeoPoint, end: GeoPoint, departure: TimePoint, limit: u8) -> Self {
        Self {
            start: start.rounded(),
            end: end.rounded(),
            departure,
            limit: limit.max(1),
        }
    }

    /// Start point
    #[must_use]
    pub const fn start(&self) -> GeoPoint {
        self.start
    }

    /// End point
    #[must_use]
    pub const fn end(&self) -> GeoPoint {
        self.end
    }

    /// Departure instant
    #[must_use]
    pub const fn departure(&self) -> TimePoint {
        self.departure
    }

    /// Maximum number of results
    #[must_use]
    pub const fn limit(&self) -> u8 {
        self.limit
    }
}

/// A query together with the stops it produced
///
/// Used to replay a known trip, such as the bundled sample, without asking the
/// trip service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedTrip {
    /// The query as it was sent
    pub query: TripQuery,
    /// The stops returned for it
    pub stops: StopSequence,
}
