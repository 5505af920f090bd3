//! Error types for Attest Core.

use thiserror::Error;

/// Core errors that can occur while generating or encoding identity records.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The randomness provider could not produce bytes. Never retried.
    #[error("randomness source failed: {0}")]
    RandomnessFailure(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors raised when bytes do not have the shape of the expected record.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed json: {0}")]
    Json(String),

    #[error("malformed cbor: {0}")]
    Cbor(String),

    #[error("invalid field {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Json(e.to_string())
    }
}

impl From<rand::Error> for CoreError {
    fn from(e: rand::Error) -> Self {
        CoreError::RandomnessFailure(e.to_string())
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
