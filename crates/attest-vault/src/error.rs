//! Error types for the vault.

use thiserror::Error;

/// Errors that can occur while locking or unlocking credentials.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Key material could not be loaded or parsed.
    #[error("invalid vault key: {0}")]
    Key(String),

    /// The randomness provider failed.
    #[error("randomness source failed: {0}")]
    Randomness(String),

    /// Encryption error.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Decryption error, including a wrong key or tampered ciphertext.
    #[error("decryption error: {0}")]
    Decryption(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] attest_core::CoreError),

    #[error("decode error: {0}")]
    Decode(#[from] attest_core::DecodeError),
}

/// Result type for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
