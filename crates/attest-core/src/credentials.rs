//! Identity records: the shareable public half and the holder's private half.
//!
//! [`PrivateCredentials`] contains its [`PublicCredentials`] by value. The two
//! key fields always belong to one key pair; decoding a private record whose
//! halves disagree fails.

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::codec::{self, Encoding};
use crate::crypto::{PrivateKey, PublicKey};
use crate::error::{DecodeError, Result};
use crate::factory::KeyPairFactory;
use crate::types::UniqueId;

/// The shareable identity: where to find the participant's public artifacts
/// and the key that verifies what they sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicCredentials {
    pub id: UniqueId,
    pub public_url: String,
    pub public_key_ed25519: PublicKey,
}

impl PublicCredentials {
    /// Serialize with the given encoding.
    pub fn to_bytes(&self, encoding: Encoding) -> Result<Vec<u8>> {
        codec::encode(self, encoding)
    }

    /// Deserialize with the given encoding.
    pub fn from_bytes(bytes: &[u8], encoding: Encoding) -> std::result::Result<Self, DecodeError> {
        codec::decode(bytes, encoding)
    }
}

/// The holder's record. Owns the private key and the private address.
///
/// Must only ever be stored in the holder's exclusive storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPrivateCredentials")]
pub struct PrivateCredentials {
    pub private_url: String,
    pub private_key_ed25519: PrivateKey,
    pub public_credentials: PublicCredentials,
}

#[derive(Deserialize)]
struct RawPrivateCredentials {
    private_url: String,
    private_key_ed25519: PrivateKey,
    public_credentials: PublicCredentials,
}

impl TryFrom<RawPrivateCredentials> for PrivateCredentials {
    type Error = DecodeError;

    fn try_from(raw: RawPrivateCredentials) -> std::result::Result<Self, Self::Error> {
        if raw.private_key_ed25519.public_key() != raw.public_credentials.public_key_ed25519 {
            return Err(DecodeError::InvalidField {
                field: "public_credentials.public_key_ed25519",
                reason: "does not match private_key_ed25519".into(),
            });
        }
        Ok(Self {
            private_url: raw.private_url,
            private_key_ed25519: raw.private_key_ed25519,
            public_credentials: raw.public_credentials,
        })
    }
}

impl PrivateCredentials {
    /// Generate credentials using the operating system CSPRNG.
    pub fn generate(public_url: impl Into<String>, private_url: impl Into<String>) -> Result<Self> {
        generate_credentials(&mut KeyPairFactory::os(), public_url, private_url)
    }

    /// The public record to publish.
    pub fn public(&self) -> &PublicCredentials {
        &self.public_credentials
    }

    /// The identity's unique ID.
    pub fn id(&self) -> UniqueId {
        self.public_credentials.id
    }

    /// The identity's public key.
    pub fn public_key(&self) -> PublicKey {
        self.public_credentials.public_key_ed25519
    }

    /// Serialize with the given encoding. Contains secret key material.
    pub fn to_bytes(&self, encoding: Encoding) -> Result<Vec<u8>> {
        codec::encode(self, encoding)
    }

    /// Deserialize with the given encoding.
    pub fn from_bytes(bytes: &[u8], encoding: Encoding) -> std::result::Result<Self, DecodeError> {
        codec::decode(bytes, encoding)
    }
}

/// Generate a new identity.
///
/// Draws exactly one key pair and one unique ID from `factory`. The URLs are
/// opaque here; reachability is the transport's concern. Performs no I/O.
pub fn generate_credentials<R: RngCore + CryptoRng>(
    factory: &mut KeyPairFactory<R>,
    public_url: impl Into<String>,
    private_url: impl Into<String>,
) -> Result<PrivateCredentials> {
    let pair = factory.generate()?;
    let id = factory.generate_unique_id()?;

    Ok(PrivateCredentials {
        private_url: private_url.into(),
        private_key_ed25519: pair.private,
        public_credentials: PublicCredentials {
            id,
            public_url: public_url.into(),
            public_key_ed25519: pair.public,
        },
    })
}
