//! Cryptographic primitives for Attest.
//!
//! Wraps Ed25519 keys with strong types. Public and private halves are
//! distinct types even though both travel as plain bytes on the wire.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroizing;

use crate::codec::base64_bytes;
use crate::error::DecodeError;

/// Length of an Ed25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of an Ed25519 private key on the wire (seed || public key).
pub const PRIVATE_KEY_LENGTH: usize = 64;

/// Length of an Ed25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; PUBLIC_KEY_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Short Blake3 fingerprint, safe to log.
    pub fn fingerprint(&self) -> String {
        blake3::hash(&self.0).to_hex().as_str()[..16].to_string()
    }

    /// Check a signature over a message.
    ///
    /// Total: a key that is not a curve point or a signature of the wrong
    /// length is simply not valid.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let Ok(sig) = Signature::from_slice(signature) else {
            return false;
        };
        verifying_key.verify(message, &sig).is_ok()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBLIC_KEY_LENGTH]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = DecodeError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| DecodeError::InvalidField {
                field: "public_key",
                reason: format!("expected {PUBLIC_KEY_LENGTH} bytes, got {}", slice.len()),
            })?;
        Ok(Self(arr))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        base64_bytes::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes: Vec<u8> = base64_bytes::deserialize(deserializer)?;
        PublicKey::try_from(bytes.as_slice()).map_err(D::Error::custom)
    }
}

/// An Ed25519 private key.
///
/// The secret is zeroed on drop and never printed. On the wire it is the
/// 64-byte `seed || public_key` form, which is validated on decode.
#[derive(Clone)]
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Create from the 64-byte `seed || public_key` form.
    ///
    /// Fails if the trailing public key is not the one the seed derives.
    pub fn from_keypair_bytes(bytes: &[u8; PRIVATE_KEY_LENGTH]) -> Result<Self, DecodeError> {
        let signing_key =
            SigningKey::from_keypair_bytes(bytes).map_err(|e| DecodeError::InvalidField {
                field: "private_key_ed25519",
                reason: e.to_string(),
            })?;
        Ok(Self { signing_key })
    }

    /// The 64-byte `seed || public_key` form.
    pub fn to_keypair_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_LENGTH]> {
        Zeroizing::new(self.signing_key.to_keypair_bytes())
    }

    /// Derive the public half.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message. Deterministic for a given key and message.
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        *self.to_keypair_bytes() == *other.to_keypair_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey(<redacted>, {:?})", self.public_key())
    }
}

impl Serialize for PrivateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let bytes = self.to_keypair_bytes();
        base64_bytes::serialize(&*bytes, serializer)
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes: Zeroizing<Vec<u8>> = Zeroizing::new(base64_bytes::deserialize(deserializer)?);
        let arr: Zeroizing<[u8; PRIVATE_KEY_LENGTH]> =
            Zeroizing::new(bytes.as_slice().try_into().map_err(|_| {
                D::Error::custom(format!(
                    "private key must be {PRIVATE_KEY_LENGTH} bytes, got {}",
                    bytes.len()
                ))
            })?);
        PrivateKey::from_keypair_bytes(&arr).map_err(D::Error::custom)
    }
}

/// An Ed25519 key pair: the private half and the public half it determines.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl KeyPair {
    /// Build from a private key, deriving the public half.
    pub fn from_private(private: PrivateKey) -> Self {
        Self {
            public: private.public_key(),
            private,
        }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self::from_private(PrivateKey::from_seed(seed))
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair({:?})", self.public)
    }
}
