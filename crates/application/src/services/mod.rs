//! Application services - Use case implementations

mod labels;
mod map_session;
mod marker_manager;
mod route_renderer;
#[cfg(test)]
mod testing;
mod trip_orchestrator;

pub use labels::{endpoint_label, stop_label};
pub use map_session::{
    CommandOutcome, DEFAULT_FIT_PADDING, DEFAULT_ZOOM, MapSession, SINGLE_MARKER_ZOOM,
    SessionConfig, SubmitTicket, UserNotice,
};
pub use marker_manager::{MarkerChange, MarkerLifecycleManager};
pub use route_renderer::RouteLineRenderer;
pub use trip_orchestrator::TripOrchestrator;
