//! Domain entities - Objects with identity and lifecycle

mod marker;
mod route_line;
mod stop_sequence;
mod trip_form;
mod trip_query;

pub use marker::Marker;
pub use route_line::RouteLine;
pub use stop_sequence::{StopSequence, StopVisit};
pub use trip_form::{FormField, TripForm};
pub use trip_query::{DEFAULT_RESULT_LIMIT, PlannedTrip, TripQuery};
