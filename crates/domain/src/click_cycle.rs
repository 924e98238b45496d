//! Click cycle - how raw map clicks become start/end placements
//!
//! Three phases repeat forever: the first click places the start, the second
//! places the end, the third clears the map without placing anything.

use serde::{Deserialize, Serialize};

use crate::value_objects::{Endpoint, GeoPoint};

/// What a click should do to the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickAction {
    /// Create or move an endpoint marker to the point
    Place(Endpoint, GeoPoint),
    /// Remove every marker and line
    ClearAll,
}

/// Click counter cycling through 0, 1, 2
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickCycle {
    count: u8,
}

impl ClickCycle {
    /// Number of clicks in one full cycle
    pub const PERIOD: u8 = 3;

    /// A cycle in its initial state
    #[must_use]
    pub const fn new() -> Self {
        Self { count: 0 }
    }

    /// Current counter value
    #[must_use]
    pub const fn count(&self) -> u8 {
        self.count
    }

    /// Interpret a click at `point` and advance the counter
    pub fn register(&mut self, point: GeoPoint) -> ClickAction {
        let action = match self.count {
            0 => ClickAction::Place(Endpoint::Start, point),
            1 => ClickAction::Place(Endpoint::End, point),
            _ => ClickAction::ClearAll,
        };
        self.count = (self.count + 1) % Self::PERIOD;
        action
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        self.count = 0;
    }
}
