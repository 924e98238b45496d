//! Trip request orchestrator
//!
//! Turns a submit into a trip query, sends it through the transport port and
//! hands the result back to the map session. The session lock is never held
//! while the request is outstanding, so the map stays interactive; a second
//! submit during that time is absorbed.

use std::sync::Arc;

use domain::{MapCommand, PlannedTrip};
use parking_lot::Mutex;
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::{DrawingSurface, TripTransportPort};
use crate::services::map_session::{CommandOutcome, MapSession, UserNotice};

/// Drives trip submissions for one map session
pub struct TripOrchestrator<S: DrawingSurface> {
    session: Arc<Mutex<MapSession<S>>>,
    transport: Arc<dyn TripTransportPort>,
    sample: Option<PlannedTrip>,
}

impl<S: DrawingSurface> std::fmt::Debug for TripOrchestrator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TripOrchestrator")
            .field("has_sample", &self.sample.is_some())
            .finish_non_exhaustive()
    }
}

impl<S: DrawingSurface> TripOrchestrator<S> {
    /// Create an orchestrator for a shared session
    pub fn new(session: Arc<Mutex<MapSession<S>>>, transport: Arc<dyn TripTransportPort>) -> Self {
        Self {
            session,
            transport,
            sample: None,
        }
    }

    /// Attach the trip rendered by [`MapCommand::ShowSample`]
    #[must_use]
    pub fn with_sample(mut self, sample: PlannedTrip) -> Self {
        self.sample = Some(sample);
        self
    }

    /// The shared session
    #[must_use]
    pub fn session(&self) -> Arc<Mutex<MapSession<S>>> {
        Arc::clone(&self.session)
    }

    /// Submit the current start, end and departure
    ///
    /// Returns the number of stops rendered. Validation failures never reach
    /// the transport; failures and stale responses leave the map unchanged.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> Result<usize, ApplicationError> {
        let ticket = self.session.lock().begin_submit()?;
        debug!(
            start = %ticket.query.start(),
            end = %ticket.query.end(),
            departure = %ticket.query.departure(),
            "Requesting trip"
        );

        let guard = InFlightGuard {
            session: &self.session,
            revision: ticket.revision(),
            armed: true,
        };
        let result = self.transport.request_trip(&ticket.query).await;
        guard.disarm();

        let rendered = self.session.lock().complete_submit(ticket, result)?;
        info!(stops = rendered, "Trip submitted");
        Ok(rendered)
    }

    /// Handle any command, forwarding synchronous ones to the session
    ///
    /// Absorbed conditions (duplicate submit, stale response) become outcomes;
    /// user-visible failures are returned as errors after the session notice
    /// has been set.
    pub async fn dispatch(&self, command: MapCommand) -> Result<CommandOutcome, ApplicationError> {
        match command {
            MapCommand::Submit => match self.submit().await {
                Ok(stops) => Ok(CommandOutcome::Rendered { stops }),
                Err(ApplicationError::SubmitInProgress) => Ok(CommandOutcome::Ignored),
                Err(ApplicationError::StaleResponse) => Ok(CommandOutcome::Discarded),
                Err(e) => Err(e),
            },
            MapCommand::ShowSample => self.show_sample(),
            other => {
                let outcome = self.session.lock().dispatch(&other);
                Ok(outcome)
            },
        }
    }

    fn show_sample(&self) -> Result<CommandOutcome, ApplicationError> {
        let mut session = self.session.lock();
        let Some(sample) = &self.sample else {
            let error = ApplicationError::Configuration("no sample route bundled".to_string());
            if let Some(notice) = UserNotice::from_error(&error) {
                session.set_notice(notice);
            }
            return Err(error);
        };
        let stops = session.show_trip(sample);
        Ok(CommandOutcome::Rendered { stops })
    }

    /// Whether the trip service answers
    pub async fn is_available(&self) -> bool {
        self.transport.is_available().await
    }
}

/// Releases the session's in-flight guard when a submit is dropped mid-request
struct InFlightGuard<'a, S: DrawingSurface> {
    session: &'a Mutex<MapSession<S>>,
    revision: u64,
    armed: bool,
}

impl<S: DrawingSurface> InFlightGuard<'_, S> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl<S: DrawingSurface> Drop for InFlightGuard<'_, S> {
    fn drop(&mut self) {
        if self.armed {
            self.session.lock().abandon_submit(self.revision);
        }
    }
}
