//! # Attest
//!
//! The unified API for Attest: portable identities and signed envelopes,
//! published through a versioned ledger.
//!
//! ## Overview
//!
//! A participant holds [`PrivateCredentials`] and publishes the matching
//! [`PublicCredentials`]. Anything they sign becomes a [`SignedPlaintext`]
//! that carries its own public key, so any reader can check it, and a reader
//! who has pinned the participant's credentials can check who signed it.
//!
//! - **Credentials**: generated once, private half locked with a vault key
//! - **Artifacts**: signed envelopes committed under a name
//! - **Verification**: [`verify_artifact`] yields a [`Verdict`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use attest::{verify_artifact, AttestConfig, Attestor, Verdict};
//! use attest::ledger::GitLedger;
//! use attest::vault::VaultKey;
//!
//! async fn example() {
//!     let config = AttestConfig::from_env().unwrap();
//!     let vault_key = VaultKey::from_env("ATTEST_VAULT_KEY").unwrap();
//!
//!     let attestor = Attestor::init(GitLedger::default(), config.clone(), &vault_key)
//!         .await
//!         .unwrap();
//!     attestor.attest("vote", b"vote: yes".to_vec()).await.unwrap();
//!
//!     let verdict = verify_artifact(
//!         attestor.ledger(),
//!         &config.public,
//!         attestor.public(),
//!         "vote",
//!         &config,
//!     )
//!     .await
//!     .unwrap();
//!     assert_eq!(verdict, Verdict::Authentic);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `attest::core` - Keys, credentials, and envelopes
//! - `attest::ledger` - Ledger abstraction, git and in-memory
//! - `attest::vault` - Encryption of private credentials at rest

pub mod attestor;
pub mod config;
pub mod error;

// Re-export component crates
pub use attest_core as core;
pub use attest_ledger as ledger;
pub use attest_vault as vault;

// Re-export main types for convenience
pub use attestor::{fetch_public_credentials, verify_artifact, Attestor, Verdict};
pub use config::AttestConfig;
pub use error::{AttestError, Result};

// Re-export commonly used core types
pub use attest_core::{
    KeyPairFactory, PrivateCredentials, PrivateKey, PublicCredentials, PublicKey,
    SignedPlaintext, UniqueId,
};
