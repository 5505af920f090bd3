//! Error types for the ledger module.

use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A transport command exited unsuccessfully. The output is not interpreted.
    #[error("`{command}` failed with status {status:?}: {stderr}")]
    Command {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// A file path that is absolute, empty, or escapes the repository.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The path reaches through a symbolic link in the stored tree.
    #[error("path crosses a symbolic link: {0}")]
    UnsafePath(String),

    /// A commit was requested with no files.
    #[error("nothing to commit")]
    EmptyCommit,

    /// A lock was poisoned by a panicking writer.
    #[error("ledger state poisoned")]
    Poisoned,
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
