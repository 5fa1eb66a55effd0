//! Funder Error Types
//!
//! Error taxonomy for the Funder client and the single place where
//! client-synthesized failures are normalized into an [`ErrorEnvelope`].

use crate::api::ErrorEnvelope;
use serde_json::Value;
use thiserror::Error;

/// Main error type for Funder operations
#[derive(Debug, Error)]
pub enum FunderError {
    /// Configuration or precondition failure (base URL missing, bad URL, bad header, unreadable config)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A parameter the operation depends on was not supplied
    #[error("Missing required parameter '{0}'")]
    MissingParameter(&'static str),

    /// No HTTP response was obtained (connection refused, host down, DNS failure)
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The backend answered with a 4xx or 5xx status
    #[error("Request failed with status {status}: {body}")]
    Http { status: u16, body: Value },

    /// The backend answered with a status that is neither success nor error
    #[error("Unhandled response status {status}")]
    UnhandledStatus { status: u16 },

    /// The response body was not valid JSON
    #[error("Malformed response (status {status}): {message}")]
    MalformedResponse { status: u16, message: String },

    /// A decoded body could not be mapped onto the requested type
    #[error("Decode error: {0}")]
    Decode(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FunderError {
    /// Normalize a client-synthesized failure into an [`ErrorEnvelope`].
    ///
    /// Only failures without a usable backend body produce an envelope.
    /// HTTP error bodies are passed through as-is and yield `None`.
    pub fn envelope(&self) -> Option<ErrorEnvelope> {
        match self {
            FunderError::Unavailable(message) => {
                Some(ErrorEnvelope::service_unavailable(message.clone()))
            }
            FunderError::MalformedResponse { status, message } => {
                Some(ErrorEnvelope::malformed_response(*status, message.clone()))
            }
            _ => None,
        }
    }

    /// Status an error handler would see for this failure
    pub fn status(&self) -> Option<u16> {
        match self {
            FunderError::Http { status, .. }
            | FunderError::UnhandledStatus { status }
            | FunderError::MalformedResponse { status, .. } => Some(*status),
            FunderError::Unavailable(_) => Some(ErrorEnvelope::SERVICE_UNAVAILABLE),
            _ => None,
        }
    }

    /// Body an error handler would see: the backend's JSON for HTTP errors,
    /// the normalized envelope for synthesized failures.
    pub fn body(&self) -> Option<Value> {
        match self {
            FunderError::Http { body, .. } => Some(body.clone()),
            _ => self.envelope().map(|envelope| envelope.to_json()),
        }
    }

    /// Whether the failure happened before any HTTP response was received
    pub fn is_unavailable(&self) -> bool {
        matches!(self, FunderError::Unavailable(_))
    }
}

impl From<reqwest::Error> for FunderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            FunderError::Config(format!("Invalid request: {}", err))
        } else {
            FunderError::Unavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FunderError {
    fn from(err: serde_json::Error) -> Self {
        FunderError::Decode(err.to_string())
    }
}

/// Result type alias for Funder operations
pub type Result<T> = std::result::Result<T, FunderError>;
