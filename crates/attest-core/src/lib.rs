//! # Attest Core
//!
//! Pure primitives for Attest: key pairs, identity credentials, and signed
//! envelopes.
//!
//! This crate contains no I/O, no storage, no networking. Randomness comes
//! from a provider injected into [`KeyPairFactory`].
//!
//! ## Key Types
//!
//! - [`KeyPairFactory`] - Generates key pairs and [`UniqueId`]s
//! - [`PublicCredentials`] - The shareable identity record
//! - [`PrivateCredentials`] - The holder's record, containing the public one
//! - [`SignedPlaintext`] - A self-verifying signed envelope
//!
//! ## Usage
//!
//! ```rust
//! use attest_core::{PrivateCredentials, SignedPlaintext};
//!
//! let creds = PrivateCredentials::generate("https://ex.org/pub", "https://ex.org/priv").unwrap();
//! let signed = SignedPlaintext::sign(&creds, &b"vote: yes"[..]);
//! assert!(signed.verify());
//! assert!(signed.is_signed_by(creds.public()));
//! ```

pub mod codec;
pub mod credentials;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod factory;
pub mod types;

pub use codec::{decode, encode, Encoding};
pub use credentials::{generate_credentials, PrivateCredentials, PublicCredentials};
pub use crypto::{KeyPair, PrivateKey, PublicKey};
pub use envelope::SignedPlaintext;
pub use error::{CoreError, DecodeError, Result};
pub use factory::KeyPairFactory;
pub use types::UniqueId;
