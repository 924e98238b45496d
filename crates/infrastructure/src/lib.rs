//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the trip service
//! transport and a headless drawing surface. Also owns configuration
//! loading and logging setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, CenterConfig, MapAppConfig};
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
