//! Logging initialization
//!
//! Sets up the global `tracing` subscriber with an `EnvFilter` and either
//! human-readable or JSON output.

mod logging;

pub use logging::{LogFormat, LoggingConfig, TelemetryError, init_logging};
