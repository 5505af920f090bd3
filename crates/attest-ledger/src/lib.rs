//! # Attest Ledger
//!
//! Ledger transport for Attest. Provides a trait-based interface for
//! committing opaque artifacts to versioned storage, with git and in-memory
//! implementations.
//!
//! ## Overview
//!
//! Credentials and signed envelopes are published by committing them to a
//! line of history in a repository. The ledger abstracts that behind the
//! [`Ledger`] trait so the identity layer is storage-agnostic. The primary
//! implementation is [`GitLedger`], with [`MemoryLedger`] for testing.
//!
//! ## Key Types
//!
//! - [`Ledger`] - The async trait for all ledger operations
//! - [`GitLedger`] - Shells out to `git` against any reachable remote
//! - [`MemoryLedger`] - In-memory ledger for tests
//! - [`Address`] - A repository and branch
//!
//! ## Usage
//!
//! ```rust,no_run
//! use attest_ledger::{Address, GitLedger, Ledger, LedgerExt};
//!
//! async fn example() {
//!     let ledger = GitLedger::default();
//!     let address = Address::main("https://ex.org/pub.git");
//!
//!     ledger
//!         .commit_file(&address, "id/public_credentials.json", b"{}", "publish credentials")
//!         .await
//!         .unwrap();
//!
//!     let bytes = ledger
//!         .read_file(&address, "id/public_credentials.json")
//!         .await
//!         .unwrap();
//!     assert!(bytes.is_some());
//! }
//! ```

pub mod error;
pub mod git;
pub mod memory;
pub mod traits;

pub use error::{LedgerError, Result};
pub use git::{GitLedger, GitLedgerConfig};
pub use memory::MemoryLedger;
pub use traits::{
    validate_path, Address, CommitId, CommitRecord, FileWrite, Ledger, LedgerExt, DEFAULT_BRANCH,
};
