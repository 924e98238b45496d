//! Value Objects - Immutable, identity-less domain primitives

mod geo_bounds;
mod geo_point;
mod marker_ref;
mod time_point;

pub use geo_bounds::GeoBounds;
pub use geo_point::{COORDINATE_DECIMALS, GeoPoint, InvalidCoordinates, round_coordinate};
pub use marker_ref::{Endpoint, LineKind, MarkerRef};
pub use time_point::{FORM_DATETIME_FORMAT, TimePoint};
