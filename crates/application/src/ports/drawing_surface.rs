//! Drawing surface port
//!
//! The map widget is an opaque surface with marker and polyline primitives.
//! It hands out handles for what it draws and keeps no logical state of its
//! own; the map session decides what exists.

use domain::value_objects::{GeoBounds, GeoPoint};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to something drawn on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    /// Wrap a raw surface id
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw surface id
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Icon drawn for a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerIcon {
    /// Default pin used for start and end
    Pin,
    /// Bus stop icon used for returned stops
    BusStop,
}

/// Everything the surface needs to draw a marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Where to draw it
    pub position: GeoPoint,
    /// Which icon to use
    pub icon: MarkerIcon,
    /// Hover title, naming the marker's role
    pub title: String,
    /// Popup content
    pub popup: String,
    /// Whether the user may drag it
    pub draggable: bool,
    /// Whether the popup opens right away
    pub open_popup: bool,
}

/// Stroke of a polyline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// CSS color
    pub color: String,
    /// Stroke width in pixels
    pub weight: f32,
    /// Stroke opacity (0-1)
    pub opacity: f32,
}

impl LineStyle {
    /// Style of the start-to-end preview line
    #[must_use]
    pub fn preview() -> Self {
        Self {
            color: "blue".to_string(),
            weight: 3.0,
            opacity: 1.0,
        }
    }

    /// Style of the line through returned stops
    #[must_use]
    pub fn stop_sequence() -> Self {
        Self {
            color: "#e74c3c".to_string(),
            weight: 4.0,
            opacity: 0.8,
        }
    }
}

/// Port for the map drawing surface
#[cfg_attr(test, automock)]
pub trait DrawingSurface: Send {
    /// Draw a marker and return its handle
    fn add_marker(&mut self, spec: &MarkerSpec) -> SurfaceHandle;

    /// Move an existing marker, keeping its popup and selection state
    fn move_marker(&mut self, handle: SurfaceHandle, position: GeoPoint);

    /// Replace the popup content of an existing marker
    fn set_popup(&mut self, handle: SurfaceHandle, content: &str);

    /// Remove a marker; unknown handles are ignored
    fn remove_marker(&mut self, handle: SurfaceHandle);

    /// Draw a polyline through `points` in order and return its handle
    fn add_polyline(&mut self, points: &[GeoPoint], style: &LineStyle) -> SurfaceHandle;

    /// Remove a polyline; unknown handles are ignored
    fn remove_polyline(&mut self, handle: SurfaceHandle);

    /// Adjust the viewport so `bounds`, grown by `padding` of their span, is visible
    fn fit_bounds(&mut self, bounds: GeoBounds, padding: f64);

    /// Center the viewport on a point at a zoom level
    fn set_view(&mut self, center: GeoPoint, zoom: u8);
}
