//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod headless_surface;
mod trip_service_adapter;

pub use headless_surface::{DrawnLine, HeadlessSurface, Viewport};
pub use trip_service_adapter::{TripServiceAdapter, load_sample_trip};
