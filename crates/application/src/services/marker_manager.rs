//! Marker lifecycle manager
//!
//! Owns the table of markers keyed by their logical role and the surface
//! handle each one was drawn with. Endpoint markers are updated in place once
//! created; stop markers are replaced wholesale on every new stop sequence.

use std::collections::BTreeMap;

use domain::{Endpoint, GeoPoint, Marker, MarkerRef, StopSequence, StopVisit};
use tracing::debug;

use crate::ports::{DrawingSurface, MarkerIcon, MarkerSpec, SurfaceHandle};

/// What happened to an endpoint marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerChange {
    /// A new marker was drawn
    Created,
    /// An existing marker was moved in place
    Moved,
}

#[derive(Debug, Clone)]
struct MarkerEntry {
    marker: Marker,
    handle: SurfaceHandle,
}

/// Table of markers currently on the surface
#[derive(Debug, Default)]
pub struct MarkerLifecycleManager {
    entries: BTreeMap<MarkerRef, MarkerEntry>,
}

impl MarkerLifecycleManager {
    /// Create an empty manager
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the endpoint marker or move the existing one in place
    pub fn upsert_endpoint<S>(
        &mut self,
        surface: &mut S,
        endpoint: Endpoint,
        position: GeoPoint,
        label: &str,
    ) -> MarkerChange
    where
        S: DrawingSurface + ?Sized,
    {
        let role = MarkerRef::from(endpoint);

        if let Some(entry) = self.entries.get_mut(&role) {
            if entry.marker.position != position {
                surface.move_marker(entry.handle, position);
            }
            if entry.marker.label != label {
                surface.set_popup(entry.handle, label);
            }
            entry.marker.relocate(position, label);
            debug!(%role, %position, handle = %entry.handle, "Moved marker");
            return MarkerChange::Moved;
        }

        let marker = Marker::new(role, position, label);
        let handle = surface.add_marker(&MarkerSpec {
            position,
            icon: MarkerIcon::Pin,
            title: role.to_string(),
            popup: marker.label.clone(),
            draggable: marker.draggable,
            open_popup: true,
        });
        debug!(%role, %position, %handle, "Created marker");
        self.entries.insert(role, MarkerEntry { marker, handle });
        MarkerChange::Created
    }

    /// Replace the popup of an existing marker; returns false if it does not exist
    pub fn set_label<S>(&mut self, surface: &mut S, role: MarkerRef, label: &str) -> bool
    where
        S: DrawingSurface + ?Sized,
    {
        let Some(entry) = self.entries.get_mut(&role) else {
            return false;
        };
        if entry.marker.label != label {
            surface.set_popup(entry.handle, label);
            entry.marker.label = label.to_string();
        }
        true
    }

    /// Remove one marker from the surface and the table
    pub fn remove<S>(&mut self, surface: &mut S, role: MarkerRef) -> bool
    where
        S: DrawingSurface + ?Sized,
    {
        match self.entries.remove(&role) {
            Some(entry) => {
                surface.remove_marker(entry.handle);
                debug!(%role, handle = %entry.handle, "Removed marker");
                true
            },
            None => false,
        }
    }

    /// Replace every stop marker with markers for `stops`, in visit order
    pub fn replace_stops<S, F>(&mut self, surface: &mut S, stops: &StopSequence, label: F) -> usize
    where
        S: DrawingSurface + ?Sized,
        F: Fn(&StopVisit) -> String,
    {
        self.clear_stops(surface);

        for (index, visit) in stops.iter().enumerate() {
            let role = MarkerRef::Stop(index);
            let marker = Marker::new(role, visit.position, label(visit));
            let handle = surface.add_marker(&MarkerSpec {
                position: marker.position,
                icon: MarkerIcon::BusStop,
                title: role.to_string(),
                popup: marker.label.clone(),
                draggable: marker.draggable,
                open_popup: false,
            });
            self.entries.insert(role, MarkerEntry { marker, handle });
        }

        debug!(count = stops.len(), "Replaced stop markers");
        stops.len()
    }

    /// Remove all stop markers, returning how many were removed
    pub fn clear_stops<S>(&mut self, surface: &mut S) -> usize
    where
        S: DrawingSurface + ?Sized,
    {
        let stops: Vec<MarkerRef> = self
            .entries
            .keys()
            .filter(|role| role.is_stop())
            .copied()
            .collect();
        for role in &stops {
            self.remove(surface, *role);
        }
        stops.len()
    }

    /// Remove every marker
    pub fn clear_all<S>(&mut self, surface: &mut S)
    where
        S: DrawingSurface + ?Sized,
    {
        for (_, entry) in std::mem::take(&mut self.entries) {
            surface.remove_marker(entry.handle);
        }
    }

    /// Marker for a role
    #[must_use]
    pub fn get(&self, role: MarkerRef) -> Option<&Marker> {
        self.entries.get(&role).map(|entry| &entry.marker)
    }

    /// Surface handle of a role's marker
    #[must_use]
    pub fn handle(&self, role: MarkerRef) -> Option<SurfaceHandle> {
        self.entries.get(&role).map(|entry| entry.handle)
    }

    /// Position of an endpoint marker
    #[must_use]
    pub fn position(&self, endpoint: Endpoint) -> Option<GeoPoint> {
        self.get(endpoint.into()).map(|marker| marker.position)
    }

    /// Stop markers in visit order
    pub fn stops(&self) -> impl Iterator<Item = &Marker> {
        self.entries
            .values()
            .map(|entry| &entry.marker)
            .filter(|marker| marker.role.is_stop())
    }

    /// All markers: start, end, then stops in visit order
    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.entries.values().map(|entry| &entry.marker)
    }

    /// Number of stop markers
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stops().count()
    }

    /// Total number of markers
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no marker exists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Positions of every marker, for view fitting
    #[must_use]
    pub fn visible_positions(&self) -> Vec<GeoPoint> {
        self.iter().map(|marker| marker.position).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockDrawingSurface;
    use crate::services::testing::RecordingSurface;
    use chrono::{TimeZone, Utc};
    use domain::TimePoint;

    fn point(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    fn visit(name: &str, lat: f64, lon: f64) -> StopVisit {
        let at = TimePoint::new(Utc.with_ymd_and_hms(2025, 4, 2, 8, 35, 0).unwrap());
        StopVisit {
            name: name.to_string(),
            position: point(lat, lon),
            arrival: at,
            departure: at,
            route_id: "A".to_string(),
            headsign: "KRZYKI".to_string(),
            trip_id: None,
        }
    }

    #[test]
    fn first_upsert_creates_marker() {
        let mut surface = RecordingSurface::default();
        let mut markers = MarkerLifecycleManager::new();

        let change = markers.upsert_endpoint(&mut surface, Endpoint::Start, point(51.1, 17.0), "Start");

        assert_eq!(change, MarkerChange::Created);
        assert_eq!(surface.markers.len(), 1);
        let spec = surface.markers.values().next().unwrap();
        assert!(spec.draggable);
        assert_eq!(spec.icon, MarkerIcon::Pin);
        assert_eq!(markers.position(Endpoint::Start), Some(point(51.1, 17.0)));
    }

    #[test]
    fn second_upsert_moves_in_place() {
        let mut surface = RecordingSurface::default();
        let mut markers = MarkerLifecycleManager::new();
        markers.upsert_endpoint(&mut surface, Endpoint::End, point(51.1, 17.0), "End");
        let handle = markers.handle(MarkerRef::End);

        let change = markers.upsert_endpoint(&mut surface, Endpoint::End, point(51.2, 17.1), "End moved");

        assert_eq!(change, MarkerChange::Moved);
        assert_eq!(markers.handle(MarkerRef::End), handle);
        assert_eq!(surface.marker_adds, 1);
        let spec = &surface.markers[&handle.unwrap()];
        assert_eq!(spec.position, point(51.2, 17.1));
        assert_eq!(spec.popup, "End moved");
    }

    #[test]
    fn unchanged_upsert_touches_nothing() {
        let mut surface = MockDrawingSurface::new();
        surface
            .expect_add_marker()
            .times(1)
            .returning(|_| SurfaceHandle::new(7));
        surface.expect_move_marker().never();
        surface.expect_set_popup().never();

        let mut markers = MarkerLifecycleManager::new();
        markers.upsert_endpoint(&mut surface, Endpoint::Start, point(51.1, 17.0), "Start");
        markers.upsert_endpoint(&mut surface, Endpoint::Start, point(51.1, 17.0), "Start");
    }

    #[test]
    fn replace_stops_removes_previous_set() {
        let mut surface = RecordingSurface::default();
        let mut markers = MarkerLifecycleManager::new();
        markers.upsert_endpoint(&mut surface, Endpoint::Start, point(51.1, 17.0), "Start");

        let first = StopSequence::new(vec![visit("A", 51.0, 17.0), visit("B", 51.01, 17.01)]);
        markers.replace_stops(&mut surface, &first, |v| v.name.clone());
        let second = StopSequence::new(vec![visit("C", 51.02, 17.02)]);
        markers.replace_stops(&mut surface, &second, |v| v.name.clone());

        assert_eq!(markers.stop_count(), 1);
        assert_eq!(surface.markers.len(), 2);
        assert_eq!(markers.get(MarkerRef::Stop(0)).unwrap().label, "C");
        assert!(markers.get(MarkerRef::Stop(1)).is_none());
    }

    #[test]
    fn stops_keep_visit_order() {
        let mut surface = RecordingSurface::default();
        let mut markers = MarkerLifecycleManager::new();
        let seq = StopSequence::new(vec![
            visit("Plac Grunwaldzki", 51.1092, 17.0415),
            visit("Dominikański", 51.1099, 17.0335),
            visit("Renoma", 51.1040, 17.0280),
        ]);

        markers.replace_stops(&mut surface, &seq, |v| v.name.clone());

        let names: Vec<&str> = markers.stops().map(|m| m.label.as_str()).collect();
        assert_eq!(names, ["Plac Grunwaldzki", "Dominikański", "Renoma"]);
        assert!(markers.stops().all(|m| !m.draggable));
    }

    #[test]
    fn empty_stop_sequence_leaves_no_stops() {
        let mut surface = RecordingSurface::default();
        let mut markers = MarkerLifecycleManager::new();
        markers.replace_stops(&mut surface, &StopSequence::new(vec![visit("A", 51.0, 17.0)]), |v| {
            v.name.clone()
        });

        let count = markers.replace_stops(&mut surface, &StopSequence::empty(), |v| v.name.clone());

        assert_eq!(count, 0);
        assert_eq!(markers.stop_count(), 0);
        assert!(surface.markers.is_empty());
    }

    #[test]
    fn remove_and_clear_all() {
        let mut surface = RecordingSurface::default();
        let mut markers = MarkerLifecycleManager::new();
        markers.upsert_endpoint(&mut surface, Endpoint::Start, point(51.1, 17.0), "Start");
        markers.upsert_endpoint(&mut surface, Endpoint::End, point(51.2, 17.0), "End");

        assert!(markers.remove(&mut surface, MarkerRef::Start));
        assert!(!markers.remove(&mut surface, MarkerRef::Start));
        assert_eq!(surface.markers.len(), 1);

        markers.clear_all(&mut surface);
        assert!(markers.is_empty());
        assert!(surface.markers.is_empty());
    }

    #[test]
    fn set_label_on_missing_marker_is_noop() {
        let mut surface = MockDrawingSurface::new();
        surface.expect_set_popup().never();
        let mut markers = MarkerLifecycleManager::new();
        assert!(!markers.set_label(&mut surface, MarkerRef::End, "End"));
    }
}
