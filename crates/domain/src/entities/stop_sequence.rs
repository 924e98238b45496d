//! Stop sequence returned by the trip-lookup service

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoPoint, TimePoint};

/// One stop on the returned trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopVisit {
    /// Stop name
    pub name: String,
    /// Stop position
    pub position: GeoPoint,
    /// Arrival at the stop
    pub arrival: TimePoint,
    /// Departure from the stop
    pub departure: TimePoint,
    /// Line identifier (e.g. "A", "148")
    pub route_id: String,
    /// Direction shown on the vehicle
    pub headsign: String,
    /// Trip the visit belongs to, when the service reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
}

/// Stops in the order the service returned them
///
/// The order is the visit order and is never re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopSequence(Vec<StopVisit>);

impl StopSequence {
    /// Wrap visits, keeping their order
    #[must_use]
    pub const fn new(visits: Vec<StopVisit>) -> Self {
        Self(visits)
    }

    /// An empty sequence
    #[must_use]
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of stops
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no stops
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over visits in order
    pub fn iter(&self) -> std::slice::Iter<'_, StopVisit> {
        self.0.iter()
    }

    /// Stop positions in visit order
    #[must_use]
    pub fn positions(&self) -> Vec<GeoPoint> {
        self.0.iter().map(|visit| visit.position).collect()
    }

    /// Borrow the visits
    #[must_use]
    pub fn visits(&self) -> &[StopVisit] {
        &self.0
    }
}

impl From<Vec<StopVisit>> for StopSequence {
    fn from(visits: Vec<StopVisit>) -> Self {
        Self(visits)
    }
}

impl<'a> IntoIterator for &'a StopSequence {
    type Item = &'a StopVisit;
    type IntoIter = std::slice::Iter<'a, StopVisit>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
