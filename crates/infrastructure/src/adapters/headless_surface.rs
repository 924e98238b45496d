//! Headless drawing surface
//!
//! Keeps the drawn scene in memory and exports it as a `GeoJSON`
//! `FeatureCollection`, so the map can be driven without a browser.

use std::collections::BTreeMap;

use application::ports::{DrawingSurface, LineStyle, MarkerIcon, MarkerSpec, SurfaceHandle};
use domain::{GeoBounds, GeoPoint};
use geojson::feature::Id;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::json;
use tracing::trace;

/// Current viewport of the surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewport {
    /// Centered on a point at a zoom level
    Centered {
        /// Center of the view
        center: GeoPoint,
        /// Zoom level
        zoom: u8,
    },
    /// Fitted to bounds, already grown by the requested padding
    Fitted {
        /// Visible area
        bounds: GeoBounds,
    },
}

impl Viewport {
    /// Center of the visible area
    #[must_use]
    pub fn center(&self) -> GeoPoint {
        match self {
            Self::Centered { center, .. } => *center,
            Self::Fitted { bounds } => bounds.center(),
        }
    }

    fn to_json(self) -> serde_json::Value {
        match self {
            Self::Centered { center, zoom } => json!({
                "center": position(center),
                "zoom": zoom,
            }),
            Self::Fitted { bounds } => json!({
                "center": position(bounds.center()),
                "bounds": [position(bounds.south_west()), position(bounds.north_east())],
            }),
        }
    }
}

/// A polyline as drawn
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnLine {
    /// Vertices in drawing order
    pub points: Vec<GeoPoint>,
    /// Stroke
    pub style: LineStyle,
}

/// In-memory surface that can be rendered to `GeoJSON`
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_id: u64,
    markers: BTreeMap<SurfaceHandle, MarkerSpec>,
    lines: BTreeMap<SurfaceHandle, DrawnLine>,
    viewport: Option<Viewport>,
}

impl HeadlessSurface {
    /// Create an empty surface
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_handle(&mut self) -> SurfaceHandle {
        self.next_id += 1;
        SurfaceHandle::new(self.next_id)
    }

    /// Markers in drawing order
    pub fn markers(&self) -> impl Iterator<Item = &MarkerSpec> {
        self.markers.values()
    }

    /// Marker behind a handle
    #[must_use]
    pub fn marker(&self, handle: SurfaceHandle) -> Option<&MarkerSpec> {
        self.markers.get(&handle)
    }

    /// Polylines in drawing order
    pub fn lines(&self) -> impl Iterator<Item = &DrawnLine> {
        self.lines.values()
    }

    /// Number of markers on the surface
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Number of polylines on the surface
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Last viewport set, if any
    #[must_use]
    pub const fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// The scene as a `GeoJSON` `FeatureCollection`
    ///
    /// Markers come first, then lines, each in drawing order. The viewport
    /// is attached as a foreign member.
    #[must_use]
    pub fn to_geojson(&self) -> FeatureCollection {
        let markers = self.markers.iter().map(|(handle, spec)| {
            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), json!("marker"));
            properties.insert("title".to_string(), json!(spec.title));
            properties.insert("icon".to_string(), json!(icon_name(spec.icon)));
            properties.insert("popup".to_string(), json!(spec.popup));
            properties.insert("draggable".to_string(), json!(spec.draggable));

            feature(
                *handle,
                Value::Point(position(spec.position)),
                properties,
            )
        });

        let lines = self.lines.iter().map(|(handle, line)| {
            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), json!("line"));
            properties.insert("color".to_string(), json!(line.style.color));
            properties.insert("weight".to_string(), json!(line.style.weight));
            properties.insert("opacity".to_string(), json!(line.style.opacity));

            let coordinates = line.points.iter().copied().map(position).collect();
            feature(*handle, Value::LineString(coordinates), properties)
        });

        let foreign_members = self.viewport.map(|viewport| {
            let mut members = JsonObject::new();
            members.insert("viewport".to_string(), viewport.to_json());
            members
        });

        FeatureCollection {
            bbox: None,
            features: markers.chain(lines).collect(),
            foreign_members,
        }
    }
}

fn feature(handle: SurfaceHandle, value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: Some(Id::Number(handle.raw().into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

// GeoJSON orders positions longitude first
fn position(point: GeoPoint) -> Vec<f64> {
    vec![point.longitude(), point.latitude()]
}

const fn icon_name(icon: MarkerIcon) -> &'static str {
    match icon {
        MarkerIcon::Pin => "pin",
        MarkerIcon::BusStop => "bus_stop",
    }
}

impl DrawingSurface for HeadlessSurface {
    fn add_marker(&mut self, spec: &MarkerSpec) -> SurfaceHandle {
        let handle = self.next_handle();
        trace!(%handle, title = %spec.title, "add marker");
        self.markers.insert(handle, spec.clone());
        handle
    }

    fn move_marker(&mut self, handle: SurfaceHandle, position: GeoPoint) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.position = position;
        }
    }

    fn set_popup(&mut self, handle: SurfaceHandle, content: &str) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            content.clone_into(&mut marker.popup);
        }
    }

    fn remove_marker(&mut self, handle: SurfaceHandle) {
        self.markers.remove(&handle);
    }

    fn add_polyline(&mut self, points: &[GeoPoint], style: &LineStyle) -> SurfaceHandle {
        let handle = self.next_handle();
        trace!(%handle, points = points.len(), "add polyline");
        self.lines.insert(
            handle,
            DrawnLine {
                points: points.to_vec(),
                style: style.clone(),
            },
        );
        handle
    }

    fn remove_polyline(&mut self, handle: SurfaceHandle) {
        self.lines.remove(&handle);
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, padding: f64) {
        self.viewport = Some(Viewport::Fitted {
            bounds: bounds.padded(padding),
        });
    }

    fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        self.viewport = Some(Viewport::Centered { center, zoom });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn pin(position: GeoPoint, title: &str) -> MarkerSpec {
        MarkerSpec {
            position,
            icon: MarkerIcon::Pin,
            title: title.to_string(),
            popup: format!("{title} popup"),
            draggable: true,
            open_popup: true,
        }
    }

    #[test]
    fn test_handles_are_unique_across_kinds() {
        let mut surface = HeadlessSurface::new();
        let a = surface.add_marker(&pin(point(51.0, 17.0), "start"));
        let b = surface.add_polyline(&[point(51.0, 17.0), point(51.1, 17.1)], &LineStyle::preview());
        let c = surface.add_marker(&pin(point(51.1, 17.1), "end"));
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(surface.marker_count(), 2);
        assert_eq!(surface.line_count(), 1);
    }

    #[test]
    fn test_move_and_popup_keep_the_marker() {
        let mut surface = HeadlessSurface::new();
        let handle = surface.add_marker(&pin(point(51.0, 17.0), "start"));

        surface.move_marker(handle, point(51.2, 17.2));
        surface.set_popup(handle, "moved");

        let marker = surface.marker(handle).unwrap();
        assert_eq!(marker.position, point(51.2, 17.2));
        assert_eq!(marker.popup, "moved");
        assert_eq!(marker.title, "start");
    }

    #[test]
    fn test_unknown_handles_are_ignored() {
        let mut surface = HeadlessSurface::new();
        surface.remove_marker(SurfaceHandle::new(42));
        surface.remove_polyline(SurfaceHandle::new(42));
        surface.move_marker(SurfaceHandle::new(42), point(1.0, 1.0));
        assert_eq!(surface.marker_count(), 0);
    }

    #[test]
    fn test_fit_bounds_pads_viewport() {
        let mut surface = HeadlessSurface::new();
        let bounds = GeoBounds::enclosing(&[point(51.0, 17.0), point(51.2, 17.4)]).unwrap();
        surface.fit_bounds(bounds, 0.5);

        match surface.viewport().unwrap() {
            Viewport::Fitted { bounds } => {
                assert!((bounds.south_west().latitude() - 50.9).abs() < 1e-9);
                assert!((bounds.north_east().longitude() - 17.6).abs() < 1e-9);
            },
            other => panic!("unexpected viewport: {other:?}"),
        }
    }

    #[test]
    fn test_geojson_layout() {
        let mut surface = HeadlessSurface::new();
        surface.add_polyline(&[point(51.0, 17.0), point(51.1, 17.1)], &LineStyle::stop_sequence());
        surface.add_marker(&pin(point(51.0, 17.0), "start"));
        surface.set_view(point(51.0, 17.0), 15);

        let json = serde_json::to_value(surface.to_geojson()).unwrap();
        assert_eq!(json["type"], "FeatureCollection");

        let features = json["features"].as_array().unwrap();
        assert_eq!(features.len(), 2);

        // Markers first, even when drawn later
        assert_eq!(features[0]["geometry"]["type"], "Point");
        assert_eq!(features[0]["geometry"]["coordinates"], json!([17.0, 51.0]));
        assert_eq!(features[0]["properties"]["title"], "start");
        assert_eq!(features[0]["properties"]["icon"], "pin");
        assert_eq!(features[0]["properties"]["draggable"], true);

        assert_eq!(features[1]["geometry"]["type"], "LineString");
        assert_eq!(features[1]["properties"]["color"], "#e74c3c");
        assert_eq!(features[1]["geometry"]["coordinates"][1], json!([17.1, 51.1]));

        assert_eq!(json["viewport"]["zoom"], 15);
    }

    #[test]
    fn test_geojson_without_viewport() {
        let json = serde_json::to_value(HeadlessSurface::new().to_geojson()).unwrap();
        assert!(json["viewport"].is_null());
        assert!(json["features"].as_array().unwrap().is_empty());
    }
}
