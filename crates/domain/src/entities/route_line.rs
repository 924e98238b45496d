//! Route line entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoPoint, LineKind};

/// A line drawn on the map, at most one per kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLine {
    /// Which line this is
    pub kind: LineKind,
    /// Ordered vertices
    pub points: Vec<GeoPoint>,
}

impl RouteLine {
    /// Straight two-point preview line
    #[must_use]
    pub fn preview(start: GeoPoint, end: GeoPoint) -> Self {
        Self {
            kind: LineKind::Preview,
            points: vec![start, end],
        }
    }

    /// Polyline through stop positions in visit order
    #[must_use]
    pub fn stop_sequence(points: Vec<GeoPoint>) -> Self {
        Self {
            kind: LineKind::StopSequence,
            points,
        }
    }

    /// Number of vertices
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the line has no vertices
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
