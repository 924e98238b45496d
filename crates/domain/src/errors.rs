//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Coordinate text that is not a number or lies outside its range
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Date/time text that cannot be interpreted
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    /// A required input is missing
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a missing input error
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingInput(what.into())
    }
}
