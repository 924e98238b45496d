//! In-memory drawing surface for service tests

use std::collections::BTreeMap;

use domain::{GeoBounds, GeoPoint};

use crate::ports::{DrawingSurface, LineStyle, MarkerSpec, SurfaceHandle};

/// Last viewport change requested by the session
#[derive(Debug, Clone, PartialEq)]
pub enum ViewChange {
    Fit(GeoBounds, f64),
    Center(GeoPoint, u8),
}

/// Surface that keeps what is drawn so tests can inspect it
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next: u64,
    pub markers: BTreeMap<SurfaceHandle, MarkerSpec>,
    pub lines: BTreeMap<SurfaceHandle, Vec<GeoPoint>>,
    pub marker_adds: usize,
    pub line_adds: usize,
    pub views: Vec<ViewChange>,
}

impl RecordingSurface {
    fn handle(&mut self) -> SurfaceHandle {
        self.next += 1;
        SurfaceHandle::new(self.next)
    }

    pub fn marker_at(&self, position: GeoPoint) -> Option<&MarkerSpec> {
        self.markers.values().find(|m| m.position == position)
    }
}

impl DrawingSurface for RecordingSurface {
    fn add_marker(&mut self, spec: &MarkerSpec) -> SurfaceHandle {
        let handle = self.handle();
        self.marker_adds += 1;
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
            marker.popup = content.to_string();
        }
    }

    fn remove_marker(&mut self, handle: SurfaceHandle) {
        self.markers.remove(&handle);
    }

    fn add_polyline(&mut self, points: &[GeoPoint], _style: &LineStyle) -> SurfaceHandle {
        let handle = self.handle();
        self.line_adds += 1;
        self.lines.insert(handle, points.to_vec());
        handle
    }

    fn remove_polyline(&mut self, handle: SurfaceHandle) {
        self.lines.remove(&handle);
    }

    fn fit_bounds(&mut self, bounds: GeoBounds, padding: f64) {
        self.views.push(ViewChange::Fit(bounds, padding));
    }

    fn set_view(&mut self, center: GeoPoint, zoom: u8) {
        self.views.push(ViewChange::Center(center, zoom));
    }
}
