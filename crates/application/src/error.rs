//! Application-level errors
//!
//! Mirrors the four failure categories the map distinguishes: validation
//! (recovered locally), request (transport failure), server (trip service
//! answered with an error status) and stale responses (silently dropped).

use domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Category of a trip service error status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerErrorKind {
    /// The service rejected the request parameters
    BadInput,
    /// The requested city is unknown to the service
    CityNotSupported,
    /// The service failed internally or returned an unexpected status
    Internal,
}

impl ServerErrorKind {
    /// Categorize an HTTP status code
    #[must_use]
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::BadInput,
            404 => Self::CityNotSupported,
            _ => Self::Internal,
        }
    }

    /// Message shown to the user for this category
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::BadInput => "The trip service rejected the request. Check the points and departure time.",
            Self::CityNotSupported => "This city is not supported by the trip service.",
            Self::Internal => "The trip service failed to process the request. Please try again later.",
        }
    }
}

impl fmt::Display for ServerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadInput => write!(f, "bad input"),
            Self::CityNotSupported => write!(f, "city not supported"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Broad error category, used for logging and notices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed or missing user input
    Validation,
    /// Network or transport failure
    Request,
    /// Error status from the trip service
    Server,
    /// Response for a superseded query
    Stale,
    /// Anything else
    Internal,
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (invalid or missing input)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The trip service could not be reached or its answer could not be read
    #[error("Request failed: {0}")]
    Request(String),

    /// The trip service answered with an error status
    #[error("Trip service error ({kind}, HTTP {status}){}", message_suffix(.message))]
    Server {
        /// Category derived from the status
        kind: ServerErrorKind,
        /// HTTP status code
        status: u16,
        /// Message from the response body, if any
        message: Option<String>,
    },

    /// A response arrived for a query that has since been superseded
    #[error("Response discarded: the query was superseded")]
    StaleResponse,

    /// A submission is already waiting for its response
    #[error("A trip request is already in flight")]
    SubmitInProgress,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl ApplicationError {
    /// Build a server error from an HTTP status
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server {
            kind: ServerErrorKind::from_status(status),
            status,
            message,
        }
    }

    /// Category of this error
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(_) => ErrorCategory::Validation,
            Self::Request(_) => ErrorCategory::Request,
            Self::Server { .. } => ErrorCategory::Server,
            Self::StaleResponse => ErrorCategory::Stale,
            Self::SubmitInProgress | Self::Configuration(_) | Self::Internal(_) => {
                ErrorCategory::Internal
            },
        }
    }

    /// Whether the user should see this error at all
    #[must_use]
    pub const fn is_user_visible(&self) -> bool {
        !matches!(self, Self::StaleResponse | Self::SubmitInProgress)
    }

    /// The single message shown to the user, `None` for silently absorbed errors
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        if !self.is_user_visible() {
            return None;
        }
        let message = match self {
            Self::Domain(DomainError::MissingInput(what)) => format!("Please provide the {what}."),
            Self::Domain(other) => other.to_string(),
            Self::Request(_) => {
                "Could not reach the trip service. Check your connection and try again.".to_string()
            },
            Self::Server { kind, .. } => kind.user_message().to_string(),
            Self::StaleResponse
            | Self::SubmitInProgress
            | Self::Configuration(_)
            | Self::Internal(_) => "Something went wrong. Please try again.".to_string(),
        };
        Some(message)
    }
}
