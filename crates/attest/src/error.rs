//! Error types for the Attestor.

use attest_core::{CoreError, DecodeError};
use attest_ledger::LedgerError;
use attest_vault::VaultError;
use thiserror::Error;

/// Errors that can occur during Attestor operations.
#[derive(Debug, Error)]
pub enum AttestError {
    /// Core error (randomness or encoding).
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// A stored record could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Ledger error.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Vault error.
    #[error("vault error: {0}")]
    Vault(#[from] VaultError),

    /// Nothing stored at the path.
    #[error("not found: {path} at {address}")]
    NotFound { address: String, path: String },

    /// Credentials are already published at the address.
    #[error("already initialized: {0}")]
    AlreadyInitialized(String),

    /// The published public record does not match the private one.
    #[error("published credentials {published} do not match held credentials {held}")]
    CredentialsMismatch { published: String, held: String },

    /// Artifact names are a single path component.
    #[error("invalid artifact name: {0:?}")]
    InvalidName(String),

    /// Missing or malformed configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for Attestor operations.
pub type Result<T> = std::result::Result<T, AttestError>;
