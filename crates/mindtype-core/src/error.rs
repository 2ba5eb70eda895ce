//! Error types for the MindType application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire MindType application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MindTypeError {
    /// Configuration error (missing credential, unreadable secret file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP-level failure while talking to the generative service
    #[error("Transport error: {message}")]
    Transport {
        status_code: Option<u16>,
        message: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", etc.
        message: String,
    },

    /// The response parsed but violated a declared schema constraint
    #[error("Schema violation: {0}")]
    Schema(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MindTypeError {
    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Transport error without a status code
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status_code: None,
            message: message.into(),
        }
    }

    /// Creates a Transport error carrying the HTTP status code
    pub fn transport_with_status(status_code: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status_code: Some(status_code),
            message: message.into(),
        }
    }

    /// Creates a Schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this is a schema violation
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema(_))
    }
}

impl From<serde_json::Error> for MindTypeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, MindTypeError>`.
pub type Result<T> = std::result::Result<T, MindTypeError>;
