//! Trip service error types

use thiserror::Error;

/// Errors that can occur while talking to the trip service
#[derive(Debug, Error)]
pub enum TransitError {
    /// Connection to the trip service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The service answered with an error status
    #[error("HTTP {status}{}", message_suffix(.message))]
    Http {
        /// HTTP status code
        status: u16,
        /// Error text from the response body, if any
        message: Option<String>,
    },

    /// Failed to parse response from the trip service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the service)
        retry_after_secs: Option<u64>,
    },

    /// A request could not be built from the given input
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

fn message_suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}
