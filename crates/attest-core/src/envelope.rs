//! Signed envelope: a payload carrying its own signature and verification key.
//!
//! Sealing, parsing and verifying are separate steps. A parsed envelope is
//! untrusted until [`SignedPlaintext::verify`] returns `true`, and even then it
//! only proves the envelope is internally consistent. Binding the embedded key
//! to a known identity is up to the caller, see
//! [`SignedPlaintext::is_signed_by`].

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::codec::{self, base64_bytes, Encoding};
use crate::credentials::{PrivateCredentials, PublicCredentials};
use crate::crypto::PublicKey;
use crate::error::{DecodeError, Result};

/// A plaintext, its Ed25519 signature, and the key that should verify it.
///
/// No relationship between the fields is enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedPlaintext {
    #[serde(with = "base64_bytes")]
    pub plaintext: Bytes,

    /// Raw signature bytes. Any length is representable; only 64-byte
    /// signatures can verify.
    #[serde(with = "base64_bytes")]
    pub signature: Bytes,

    #[serde(rename = "ed25519_public_key")]
    pub public_key_ed25519: PublicKey,
}

impl SignedPlaintext {
    /// Seal a plaintext with the holder's private key.
    ///
    /// The embedded key is the one the holder's public identity advertises.
    pub fn sign(credentials: &PrivateCredentials, plaintext: impl Into<Bytes>) -> Self {
        let plaintext = plaintext.into();
        let signature = credentials.private_key_ed25519.sign(&plaintext);

        Self {
            plaintext,
            signature: Bytes::copy_from_slice(&signature),
            public_key_ed25519: credentials.public_credentials.public_key_ed25519,
        }
    }

    /// Decode a JSON envelope. Performs no cryptographic check.
    pub fn parse(bytes: &[u8]) -> std::result::Result<Self, DecodeError> {
        Self::parse_with(bytes, Encoding::Json)
    }

    /// Decode an envelope in the given encoding.
    pub fn parse_with(bytes: &[u8], encoding: Encoding) -> std::result::Result<Self, DecodeError> {
        codec::decode(bytes, encoding)
    }

    /// Encode in the given encoding.
    pub fn to_bytes(&self, encoding: Encoding) -> Result<Vec<u8>> {
        codec::encode(self, encoding)
    }

    /// Whether `signature` is a valid signature over `plaintext` under the
    /// embedded key. Never fails.
    pub fn verify(&self) -> bool {
        self.public_key_ed25519.verify(&self.plaintext, &self.signature)
    }

    /// Whether the embedded key is the one `signer` published.
    ///
    /// Says nothing about the signature; combine with [`verify`](Self::verify).
    pub fn is_signed_by(&self, signer: &PublicCredentials) -> bool {
        self.public_key_ed25519 == signer.public_key_ed25519
    }
}
