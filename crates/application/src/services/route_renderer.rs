//! Route line renderer
//!
//! Keeps at most one preview line and one stop-sequence line on the surface.
//! Redrawing always removes the previous line of the same kind first.

use domain::{GeoPoint, LineKind, RouteLine, StopSequence};
use tracing::debug;

use crate::ports::{DrawingSurface, LineStyle, SurfaceHandle};

#[derive(Debug, Clone)]
struct LineEntry {
    line: RouteLine,
    handle: SurfaceHandle,
}

/// Owner of the preview and stop-sequence lines
#[derive(Debug)]
pub struct RouteLineRenderer {
    preview: Option<LineEntry>,
    stop_route: Option<LineEntry>,
    preview_style: LineStyle,
    stop_style: LineStyle,
}

impl Default for RouteLineRenderer {
    fn default() -> Self {
        Self::new(LineStyle::preview(), LineStyle::stop_sequence())
    }
}

impl RouteLineRenderer {
    /// Create a renderer with explicit styles
    #[must_use]
    pub const fn new(preview_style: LineStyle, stop_style: LineStyle) -> Self {
        Self {
            preview: None,
            stop_route: None,
            preview_style,
            stop_style,
        }
    }

    /// Draw the straight start-to-end line, or remove it when either point is missing
    ///
    /// Calling it again with the same points leaves the surface untouched.
    pub fn refresh_preview<S>(&mut self, surface: &mut S, start: Option<GeoPoint>, end: Option<GeoPoint>)
    where
        S: DrawingSurface + ?Sized,
    {
        let Some((start, end)) = start.zip(end) else {
            self.remove(surface, LineKind::Preview);
            return;
        };

        let line = RouteLine::preview(start, end);
        if self.preview.as_ref().is_some_and(|entry| entry.line == line) {
            return;
        }

        self.remove(surface, LineKind::Preview);
        let handle = surface.add_polyline(&line.points, &self.preview_style);
        debug!(%start, %end, %handle, "Drew preview line");
        self.preview = Some(LineEntry { line, handle });
    }

    /// Draw the polyline through the stops in visit order
    ///
    /// Fewer than two stops leave no line at all.
    pub fn refresh_stop_route<S>(&mut self, surface: &mut S, stops: &StopSequence)
    where
        S: DrawingSurface + ?Sized,
    {
        self.remove(surface, LineKind::StopSequence);
        if stops.len() < 2 {
            return;
        }

        let line = RouteLine::stop_sequence(stops.positions());
        let handle = surface.add_polyline(&line.points, &self.stop_style);
        debug!(vertices = line.len(), %handle, "Drew stop route");
        self.stop_route = Some(LineEntry { line, handle });
    }

    /// Remove the line of one kind if present
    pub fn remove<S>(&mut self, surface: &mut S, kind: LineKind) -> bool
    where
        S: DrawingSurface + ?Sized,
    {
        let slot = match kind {
            LineKind::Preview => &mut self.preview,
            LineKind::StopSequence => &mut self.stop_route,
        };
        match slot.take() {
            Some(entry) => {
                surface.remove_polyline(entry.handle);
                true
            },
            None => false,
        }
    }

    /// Remove both lines
    pub fn clear<S>(&mut self, surface: &mut S)
    where
        S: DrawingSurface + ?Sized,
    {
        self.remove(surface, LineKind::Preview);
        self.remove(surface, LineKind::StopSequence);
    }

    /// The current line of a kind
    #[must_use]
    pub fn line(&self, kind: LineKind) -> Option<&RouteLine> {
        match kind {
            LineKind::Preview => self.preview.as_ref(),
            LineKind::StopSequence => self.stop_route.as_ref(),
        }
        .map(|entry| &entry.line)
    }

    /// Number of lines currently drawn
    #[must_use]
    pub fn count(&self) -> usize {
        usize::from(self.preview.is_some()) + usize::from(self.stop_route.is_some())
    }
}
