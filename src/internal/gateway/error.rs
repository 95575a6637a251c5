//! Failure taxonomy of the request gateway.

use std::time::Duration;

use thiserror::Error;

/// Coarse classification of a gateway failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport-level failure: DNS, refused connection, malformed URL.
    Network,
    /// The deadline fired before the exchange completed.
    Timeout,
    /// The server answered with a status outside 200..=299.
    HttpStatus,
    /// The body (or the record inside it) was not the JSON we expected.
    Parse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Timeout => "timeout",
            ErrorKind::HttpStatus => "http_status",
            ErrorKind::Parse => "parse",
        }
    }
}

/// Error returned by every gateway call. Messages are written to be shown
/// to the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    #[error("Invalid JSON response: {0}")]
    Parse(String),
}

impl GatewayError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GatewayError::Network(_) => ErrorKind::Network,
            GatewayError::Timeout(_) => ErrorKind::Timeout,
            GatewayError::HttpStatus { .. } => ErrorKind::HttpStatus,
            GatewayError::Parse(_) => ErrorKind::Parse,
        }
    }

    /// Status code for `HttpStatus` failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::HttpStatus { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // Only reachable if the client itself was built with a timeout.
            GatewayError::Timeout(Duration::ZERO)
        } else if err.is_builder() {
            GatewayError::Network(format!("invalid request: {}", err))
        } else if err.is_decode() {
            GatewayError::Parse(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Parse(err.to_string())
    }
}
