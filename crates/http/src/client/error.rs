//! Client error types

use crate::types::AuthLevel;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// No cached token, or the cached token lacks the required privilege.
    /// Raised before anything is sent.
    #[error("Not authorized: endpoint requires {required} access")]
    Authorization { required: AuthLevel },

    /// Server answered with a status outside 200..=299
    #[error("Server responded {status}: {message}")]
    Response { status: u16, message: String },

    /// Response body did not match the declared response type
    #[error("Failed to parse response: {0}")]
    Parse(#[source] serde_json::Error),

    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Request input could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ClientError {
    /// HTTP status for `Response` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the call was refused locally for lack of credentials
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization { .. })
    }
}
