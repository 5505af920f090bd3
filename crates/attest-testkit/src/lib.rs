//! # Attest Testkit
//!
//! Testing utilities for Attest.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: RFC 8032 Ed25519 cases with expected outputs, for
//!   cross-implementation verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Deterministic participants and a scripted randomness provider
//!
//! ## Golden Vectors
//!
//! ```rust
//! use attest_testkit::vectors::verify_all_vectors;
//!
//! for (name, passed, detail) in verify_all_vectors() {
//!     assert!(passed, "{name}: {detail}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use attest_testkit::generators::signed_plaintext;
//!
//! proptest! {
//!     #[test]
//!     fn envelopes_verify((creds, signed) in signed_plaintext(256)) {
//!         prop_assert!(signed.is_signed_by(creds.public()));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use attest_testkit::fixtures::TestFixture;
//!
//! let alice = TestFixture::with_seed(1);
//! let signed = alice.sign(b"vote: yes");
//! assert!(signed.is_signed_by(alice.public()));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, ScriptedRng, TestFixture};
pub use generators::{credentials, plaintext, signed_plaintext};
pub use vectors::{all_vectors, envelope_from_vector, verify_all_vectors, GoldenVector};
