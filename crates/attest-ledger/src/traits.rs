//! Ledger trait: the abstract interface for versioned artifact storage.
//!
//! A ledger is a set of repositories, each with named lines of history
//! (branches). Artifacts are opaque byte blobs stored at relative paths and
//! committed with a message. Implementations include git (primary) and
//! in-memory (for tests).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::{LedgerError, Result};

/// Default line of history.
pub const DEFAULT_BRANCH: &str = "main";

/// A line of history in a repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    /// Repository URL or local path.
    pub repo: String,
    /// Branch name.
    pub branch: String,
}

impl Address {
    pub fn new(repo: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    /// The default branch of `repo`.
    pub fn main(repo: impl Into<String>) -> Self {
        Self::new(repo, DEFAULT_BRANCH)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repo, self.branch)
    }
}

/// Identifier of a commit (hex digest).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitId(pub String);

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A commit as listed in history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: CommitId,
    /// First line of the commit message.
    pub subject: String,
}

/// A file to write in a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    /// Path relative to the repository root.
    pub path: String,
    pub contents: Vec<u8>,
}

impl FileWrite {
    pub fn new(path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// The Ledger trait: async interface for committing and reading artifacts.
///
/// # Design Notes
///
/// - **Whole-commit writes**: all files in one call land in one commit.
/// - **Missing is not an error**: reading from a branch that does not exist
///   yet, or a path that was never written, returns `None`.
/// - **No interpretation of content**: blobs are opaque bytes.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Write `files` on the branch at `address` and commit them with `message`,
    /// creating the branch if needed. Returns the new head.
    async fn commit_files(
        &self,
        address: &Address,
        files: &[FileWrite],
        message: &str,
    ) -> Result<CommitId>;

    /// Read a file from the head of the branch at `address`.
    async fn read_file(&self, address: &Address, path: &str) -> Result<Option<Vec<u8>>>;

    /// List commits on the branch, newest first.
    async fn history(&self, address: &Address) -> Result<Vec<CommitRecord>>;
}

/// A shared ledger is a ledger.
#[async_trait]
impl<L: Ledger + ?Sized> Ledger for Arc<L> {
    async fn commit_files(
        &self,
        address: &Address,
        files: &[FileWrite],
        message: &str,
    ) -> Result<CommitId> {
        (**self).commit_files(address, files, message).await
    }

    async fn read_file(&self, address: &Address, path: &str) -> Result<Option<Vec<u8>>> {
        (**self).read_file(address, path).await
    }

    async fn history(&self, address: &Address) -> Result<Vec<CommitRecord>> {
        (**self).history(address).await
    }
}

/// Extension trait for common ledger patterns.
#[async_trait]
pub trait LedgerExt: Ledger {
    /// Commit a single file.
    async fn commit_file(
        &self,
        address: &Address,
        path: &str,
        contents: &[u8],
        message: &str,
    ) -> Result<CommitId> {
        self.commit_files(address, &[FileWrite::new(path, contents)], message)
            .await
    }
}

impl<L: Ledger + ?Sized> LedgerExt for L {}

/// Reject paths that are absolute, empty, or climb out of the repository.
pub fn validate_path(path: &str) -> Result<()> {
    let invalid = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path
            .split('/')
            .any(|part| part.is_empty() || part == "." || part == ".." || part == ".git");

    if invalid {
        return Err(LedgerError::InvalidPath(path.to_string()));
    }
    Ok(())
}
