//! Marker entity - logical state of a pin on the map

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoPoint, MarkerRef};

/// A marker owned by the map session
///
/// The drawing surface only holds a rendering handle for it; position, label
/// and role live here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Logical identity
    pub role: MarkerRef,
    /// Current position
    pub position: GeoPoint,
    /// Popup content
    pub label: String,
    /// Whether the user may drag it
    pub draggable: bool,
}

impl Marker {
    /// Create a draggable endpoint marker or a fixed stop marker depending on `role`
    pub fn new(role: MarkerRef, position: GeoPoint, label: impl Into<String>) -> Self {
        Self {
            role,
            position,
            label: label.into(),
            draggable: !role.is_stop(),
        }
    }

    /// Move the marker and replace its label, keeping its identity
    pub fn relocate(&mut self, position: GeoPoint, label: impl Into<String>) {
        self.position = position;
        self.label = label.into();
    }
}
