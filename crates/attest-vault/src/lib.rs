//! # Attest Vault
//!
//! Encryption at rest for private credentials.
//!
//! ## Overview
//!
//! A [`PrivateCredentials`](attest_core::PrivateCredentials) record holds the
//! holder's private key and must never reach a shared store in clear. The
//! vault wraps it into [`LockedCredentials`] before it is committed to the
//! holder's private ledger address.
//!
//! ## Encryption Model
//!
//! - **Vault key**: a 256-bit symmetric key held by the holder, typically
//!   loaded from an environment variable with [`VaultKey::from_env`]
//! - **Cipher**: ChaCha20-Poly1305 with a fresh random nonce per lock
//! - **Authenticated data**: the identity's public key, left readable
//!
//! ## Usage
//!
//! ```rust
//! use attest_core::PrivateCredentials;
//! use attest_vault::{LockedCredentials, VaultKey};
//!
//! let creds = PrivateCredentials::generate("https://ex.org/pub", "https://ex.org/priv").unwrap();
//! let key = VaultKey::generate().unwrap();
//!
//! let locked = LockedCredentials::lock(&creds, &key).unwrap();
//! let bytes = locked.to_bytes().unwrap();
//!
//! let unlocked = LockedCredentials::from_bytes(&bytes).unwrap().unlock(&key).unwrap();
//! assert_eq!(unlocked, creds);
//! ```

pub mod crypto;
pub mod error;
pub mod locked;

pub use crypto::{VaultKey, VaultNonce};
pub use error::{Result, VaultError};
pub use locked::{LockedCredentials, VaultFormat};
