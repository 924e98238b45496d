//! Map session
//!
//! The explicitly constructed owner of everything on one map: the drawing
//! surface, the marker table, the route lines, the trip form and the click
//! cycle. Every user interaction arrives here as a [`MapCommand`] or a direct
//! method call; nothing else mutates the surface.
//!
//! Each change that would make an outstanding trip request obsolete (moving an
//! endpoint, changing the departure, clearing) bumps a revision counter. A
//! response is only applied if the revision it was requested at is still
//! current.

use chrono_tz::Tz;
use domain::{
    ClickAction, ClickCycle, DomainError, Endpoint, FormField, GeoBounds, GeoPoint, LineKind,
    MapCommand, MarkerRef, PlannedTrip, StopSequence, TimePoint, TripForm, TripQuery,
    DEFAULT_RESULT_LIMIT, parse_point, parse_time,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{ApplicationError, ErrorCategory};
use crate::ports::DrawingSurface;
use crate::services::labels::{endpoint_label, stop_label};
use crate::services::marker_manager::{MarkerChange, MarkerLifecycleManager};
use crate::services::route_renderer::RouteLineRenderer;

/// Default zoom of the initial view
pub const DEFAULT_ZOOM: u8 = 13;

/// Zoom used when only one marker is visible
pub const SINGLE_MARKER_ZOOM: u8 = 15;

/// Default fit padding, as a ratio of the bounds' span
pub const DEFAULT_FIT_PADDING: f64 = 0.5;

/// Settings of a map session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Timezone used to display and read local times
    pub display_timezone: Tz,
    /// Center of the initial view
    pub default_center: GeoPoint,
    /// Zoom of the initial view
    pub default_zoom: u8,
    /// Zoom used when only one marker is visible
    pub single_marker_zoom: u8,
    /// Padding ratio applied when fitting the view to markers
    pub fit_padding: f64,
    /// Result limit sent with each trip query
    pub result_limit: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            display_timezone: chrono_tz::Europe::Warsaw,
            default_center: GeoPoint::wroclaw(),
            default_zoom: DEFAULT_ZOOM,
            single_marker_zoom: SINGLE_MARKER_ZOOM,
            fit_padding: DEFAULT_FIT_PADDING,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

/// The one message currently shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserNotice {
    /// What kind of failure produced it
    pub category: ErrorCategory,
    /// Human-readable text
    pub message: String,
}

impl UserNotice {
    /// Notice for an error, `None` if the error is absorbed silently
    #[must_use]
    pub fn from_error(error: &ApplicationError) -> Option<Self> {
        error.user_message().map(|message| Self {
            category: error.category(),
            message,
        })
    }
}

/// Result of handling one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The map state changed
    Applied,
    /// Nothing changed (invalid input, duplicate submit, nothing to act on)
    Ignored,
    /// A stop sequence was rendered
    Rendered {
        /// Number of stop markers drawn
        stops: usize,
    },
    /// A trip response arrived for a superseded query and was dropped
    Discarded,
}

/// A submission in flight: the query that was sent and the revision it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitTicket {
    /// Query built from the session state
    pub query: TripQuery,
    revision: u64,
}

impl SubmitTicket {
    /// Session revision the query was built at
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

/// State of one interactive map
pub struct MapSession<S: DrawingSurface> {
    surface: S,
    config: SessionConfig,
    markers: MarkerLifecycleManager,
    lines: RouteLineRenderer,
    form: TripForm,
    clicks: ClickCycle,
    revision: u64,
    in_flight: Option<u64>,
    notice: Option<UserNotice>,
    last_stops: Option<StopSequence>,
    // last valid departure, shown in endpoint popups
    labeled_departure: Option<TimePoint>,
}

impl<S: DrawingSurface> std::fmt::Debug for MapSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapSession")
            .field("markers", &self.markers.len())
            .field("lines", &self.lines.count())
            .field("form", &self.form)
            .field("clicks", &self.clicks.count())
            .field("revision", &self.revision)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl<S: DrawingSurface> MapSession<S> {
    /// Create a session on `surface`, showing the default view
    pub fn new(mut surface: S, config: SessionConfig) -> Self {
        surface.set_view(config.default_center, config.default_zoom);
        let form = TripForm::new(TimePoint::now().to_form_value(config.display_timezone));
        let labeled_departure = parse_time(form.departure(), config.display_timezone).ok();

        Self {
            surface,
            config,
            markers: MarkerLifecycleManager::new(),
            lines: RouteLineRenderer::default(),
            form,
            clicks: ClickCycle::new(),
            revision: 0,
            in_flight: None,
            notice: None,
            last_stops: None,
            labeled_departure,
        }
    }

    /// Handle a synchronous command
    ///
    /// `Submit` and `ShowSample` need the trip orchestrator and are ignored here.
    pub fn dispatch(&mut self, command: &MapCommand) -> CommandOutcome {
        match command {
            MapCommand::Click { point } => {
                self.handle_click(*point);
                CommandOutcome::Applied
            },
            MapCommand::FieldEdit { field, value } => match self.edit_field(*field, value) {
                Ok(()) => CommandOutcome::Applied,
                Err(e) => {
                    debug!(%field, error = %e, "Field edit not applied");
                    CommandOutcome::Ignored
                },
            },
            MapCommand::DragEnd { endpoint, position } => {
                if self.drag_update(*endpoint, *position) {
                    CommandOutcome::Applied
                } else {
                    CommandOutcome::Ignored
                }
            },
            MapCommand::Clear => {
                self.clear_all();
                CommandOutcome::Applied
            },
            MapCommand::Submit | MapCommand::ShowSample => {
                debug!(%command, "Command needs the trip orchestrator");
                CommandOutcome::Ignored
            },
        }
    }

    /// Interpret a map click through the click cycle
    pub fn handle_click(&mut self, point: GeoPoint) {
        match self.clicks.register(point) {
            ClickAction::Place(endpoint, point) => self.set_marker(endpoint, point),
            ClickAction::ClearAll => self.clear_all(),
        }
    }

    /// Create or move an endpoint marker, sync its form fields and the preview line
    #[instrument(skip(self))]
    pub fn set_marker(&mut self, endpoint: Endpoint, point: GeoPoint) {
        self.place_endpoint(endpoint, point, true);
    }

    /// Move an endpoint marker after a drag, keeping the current view
    ///
    /// Returns false if the marker does not exist.
    pub fn drag_update(&mut self, endpoint: Endpoint, point: GeoPoint) -> bool {
        if self.markers.position(endpoint).is_none() {
            debug!(%endpoint, "Drag for missing marker ignored");
            return false;
        }
        self.place_endpoint(endpoint, point, false);
        true
    }

    fn place_endpoint(&mut self, endpoint: Endpoint, point: GeoPoint, refit: bool) {
        let previous = self.markers.position(endpoint);
        if let Ok(departure) = self.departure() {
            self.labeled_departure = Some(departure);
        }
        let label = endpoint_label(endpoint, self.labeled_departure, self.config.display_timezone);
        let change = self
            .markers
            .upsert_endpoint(&mut self.surface, endpoint, point, &label);

        self.form.set_point(endpoint, point);
        if previous != Some(point) {
            self.revision += 1;
        }
        self.refresh_preview();

        if refit && (change == MarkerChange::Created || previous != Some(point)) {
            self.fit_view();
        }
    }

    /// Apply an edit of a form field
    ///
    /// Coordinate edits move the marker only once both fields of the pair
    /// parse; a valid departure edit refreshes both endpoint popups. Invalid or
    /// partial input keeps the typed text but leaves the map untouched.
    pub fn edit_field(&mut self, field: FormField, value: &str) -> Result<(), DomainError> {
        let before = self.departure().ok();
        self.form.set(field, value);

        match field.endpoint() {
            Some(endpoint) => {
                let (lat, lng) = self.form.coordinates(endpoint);
                let point = parse_point(lat, lng)?;
                self.set_marker(endpoint, point);
            },
            None => {
                let departure = self.departure()?;
                if before != Some(departure) {
                    self.revision += 1;
                }
                self.refresh_endpoint_labels(Some(departure));
            },
        }
        Ok(())
    }

    fn refresh_endpoint_labels(&mut self, departure: Option<TimePoint>) {
        self.labeled_departure = departure;
        for endpoint in Endpoint::ALL {
            let label = endpoint_label(endpoint, departure, self.config.display_timezone);
            self.markers
                .set_label(&mut self.surface, endpoint.into(), &label);
        }
    }

    /// Remove one endpoint marker together with the preview line
    pub fn clear_marker(&mut self, endpoint: Endpoint) -> bool {
        if !self.markers.remove(&mut self.surface, endpoint.into()) {
            return false;
        }
        self.form.clear_point(endpoint);
        self.revision += 1;
        self.refresh_preview();
        self.fit_view();
        true
    }

    /// Remove every marker and line, empty the coordinates and reset the departure to now
    #[instrument(skip(self))]
    pub fn clear_all(&mut self) {
        self.markers.clear_all(&mut self.surface);
        self.lines.clear(&mut self.surface);
        for endpoint in Endpoint::ALL {
            self.form.clear_point(endpoint);
        }
        self.form.set(
            FormField::Departure,
            TimePoint::now().to_form_value(self.config.display_timezone),
        );
        self.clicks.reset();
        self.labeled_departure = self.departure().ok();
        self.last_stops = None;
        self.notice = None;
        self.revision += 1;
        debug!(revision = self.revision, "Cleared map");
    }

    /// Replace the stop markers with markers for `stops`
    pub fn set_stops(&mut self, stops: &StopSequence) -> usize {
        let tz = self.config.display_timezone;
        self.markers
            .replace_stops(&mut self.surface, stops, |visit| stop_label(visit, tz))
    }

    /// Redraw the preview line from the current endpoint markers
    pub fn refresh_preview(&mut self) {
        let start = self.markers.position(Endpoint::Start);
        let end = self.markers.position(Endpoint::End);
        self.lines.refresh_preview(&mut self.surface, start, end);
    }

    /// Redraw the stop-sequence line
    pub fn refresh_stop_route(&mut self, stops: &StopSequence) {
        self.lines.refresh_stop_route(&mut self.surface, stops);
    }

    /// Render a stop sequence: markers, route line and view
    pub fn apply_stops(&mut self, stops: StopSequence) -> usize {
        let count = self.set_stops(&stops);
        self.refresh_stop_route(&stops);
        self.fit_view();
        self.last_stops = Some(stops);
        count
    }

    /// Replay a known trip: endpoints, departure and stops
    pub fn show_trip(&mut self, trip: &PlannedTrip) -> usize {
        let query = &trip.query;
        self.form.set(
            FormField::Departure,
            query.departure().to_form_value(self.config.display_timezone),
        );
        self.refresh_endpoint_labels(Some(query.departure()));
        self.revision += 1;
        self.set_marker(Endpoint::Start, query.start());
        self.set_marker(Endpoint::End, query.end());
        self.apply_stops(trip.stops.clone())
    }

    /// Fit the viewport to the visible markers
    ///
    /// No markers keeps the view; a single position centers on it.
    pub fn fit_view(&mut self) {
        let positions = self.markers.visible_positions();
        let Some(bounds) = GeoBounds::enclosing(&positions) else {
            return;
        };
        if bounds.is_point() {
            self.surface
                .set_view(bounds.center(), self.config.single_marker_zoom);
        } else {
            self.surface.fit_bounds(bounds, self.config.fit_padding);
        }
    }

    /// Start a submission
    ///
    /// Fails with [`ApplicationError::SubmitInProgress`] while another request
    /// is outstanding, and with a validation error (also stored as the current
    /// notice) if start, end or departure is missing or invalid.
    #[instrument(skip(self))]
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, ApplicationError> {
        if self.in_flight.is_some() {
            debug!("Submit ignored while a request is in flight");
            return Err(ApplicationError::SubmitInProgress);
        }

        let query = self.build_query().inspect_err(|e| {
            warn!(error = %e, "Trip request not sent");
            self.notice = UserNotice::from_error(e);
        })?;

        self.notice = None;
        self.in_flight = Some(self.revision);
        Ok(SubmitTicket {
            query,
            revision: self.revision,
        })
    }

    fn build_query(&self) -> Result<TripQuery, ApplicationError> {
        let start = self
            .markers
            .position(Endpoint::Start)
            .ok_or_else(|| DomainError::missing("start point"))?;
        let end = self
            .markers
            .position(Endpoint::End)
            .ok_or_else(|| DomainError::missing("end point"))?;
        let departure = self.departure()?;
        Ok(TripQuery::with_limit(
            start,
            end,
            departure,
            self.config.result_limit,
        ))
    }

    /// Finish a submission with the transport's result
    ///
    /// Results for a superseded revision are dropped without touching the map.
    /// Failures leave the map as it was and set the notice.
    pub fn complete_submit(
        &mut self,
        ticket: SubmitTicket,
        result: Result<StopSequence, ApplicationError>,
    ) -> Result<usize, ApplicationError> {
        self.in_flight = None;

        if ticket.revision != self.revision {
            warn!(
                requested_at = ticket.revision,
                current = self.revision,
                "Discarding trip response for superseded query"
            );
            return Err(ApplicationError::StaleResponse);
        }

        match result {
            Ok(stops) => {
                let count = self.apply_stops(stops);
                info!(stops = count, "Rendered trip");
                Ok(count)
            },
            Err(e) => {
                warn!(error = %e, "Trip request failed");
                self.notice = UserNotice::from_error(&e);
                Err(e)
            },
        }
    }

    /// Release the in-flight guard of a submission that will never complete
    ///
    /// Only the revision that set the guard can release it. Returns whether
    /// the guard was released.
    pub fn abandon_submit(&mut self, revision: u64) -> bool {
        if self.in_flight != Some(revision) {
            return false;
        }
        warn!(revision, "Trip request abandoned before a response arrived");
        self.in_flight = None;
        true
    }

    /// Departure parsed from the form
    pub fn departure(&self) -> Result<TimePoint, DomainError> {
        parse_time(self.form.departure(), self.config.display_timezone)
    }

    /// Whether a submission is outstanding
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Current revision
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// The marker table
    #[must_use]
    pub const fn markers(&self) -> &MarkerLifecycleManager {
        &self.markers
    }

    /// The route lines
    #[must_use]
    pub const fn lines(&self) -> &RouteLineRenderer {
        &self.lines
    }

    /// The trip form
    #[must_use]
    pub const fn form(&self) -> &TripForm {
        &self.form
    }

    /// Current click counter
    #[must_use]
    pub const fn click_count(&self) -> u8 {
        self.clicks.count()
    }

    /// The notice currently shown, if any
    #[must_use]
    pub const fn notice(&self) -> Option<&UserNotice> {
        self.notice.as_ref()
    }

    /// Take the current notice, dismissing it
    pub fn take_notice(&mut self) -> Option<UserNotice> {
        self.notice.take()
    }

    /// Show a notice
    pub fn set_notice(&mut self, notice: UserNotice) {
        self.notice = Some(notice);
    }

    /// The stop sequence rendered last
    #[must_use]
    pub const fn last_stops(&self) -> Option<&StopSequence> {
        self.last_stops.as_ref()
    }

    /// Whether the preview line is drawn
    #[must_use]
    pub fn has_preview(&self) -> bool {
        self.lines.line(LineKind::Preview).is_some()
    }

    /// Whether a marker with this role exists
    #[must_use]
    pub fn has_marker(&self, role: MarkerRef) -> bool {
        self.markers.get(role).is_some()
    }

    /// Session settings
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The drawing surface
    #[must_use]
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Release the drawing surface
    pub fn into_surface(self) -> S {
        self.surface
    }
}
