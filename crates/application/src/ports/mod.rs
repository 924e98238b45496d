//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod drawing_surface;
mod trip_transport_port;

#[cfg(test)]
pub use drawing_surface::MockDrawingSurface;
pub use drawing_surface::{DrawingSurface, LineStyle, MarkerIcon, MarkerSpec, SurfaceHandle};
#[cfg(test)]
pub use trip_transport_port::MockTripTransportPort;
pub use trip_transport_port::TripTransportPort;
