//! Application layer - Use cases and orchestration
//!
//! Owns the map session and its collaborators (marker table, route lines,
//! trip orchestrator) and defines the ports the infrastructure layer
//! implements: the drawing surface and the trip transport.

pub mod error;
pub mod ports;
pub mod services;

pub use error::{ApplicationError, ErrorCategory, ServerErrorKind};
pub use ports::*;
pub use services::*;
