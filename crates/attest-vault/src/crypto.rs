//! Symmetric primitives for the vault.
//!
//! ChaCha20-Poly1305 authenticated encryption with 256-bit keys.

use chacha20poly1305::{
    aead::{Aead, KeyInit, Payload},
    ChaCha20Poly1305, Nonce,
};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Result, VaultError};

/// A 256-bit symmetric key. Zeroed on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct VaultKey([u8; 32]);

impl VaultKey {
    /// Generate a new random key from the operating system CSPRNG.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRng)
    }

    /// Generate a new random key from the given provider.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut bytes = [0u8; 32];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| VaultError::Randomness(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes =
            Zeroizing::new(hex::decode(s.trim()).map_err(|e| VaultError::Key(e.to_string()))?);
        let arr: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| VaultError::Key(format!("expected 32 bytes, got {}", bytes.len())))?;
        Ok(Self(arr))
    }

    /// Load a hex-encoded key from an environment variable.
    pub fn from_env(var: &str) -> Result<Self> {
        let value = Zeroizing::new(
            std::env::var(var).map_err(|e| VaultError::Key(format!("{var}: {e}")))?,
        );
        Self::from_hex(&value)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Encrypt data with this key, authenticating `aad` alongside it.
    pub fn encrypt(&self, plaintext: &[u8], aad: &[u8], nonce: &VaultNonce) -> Result<Vec<u8>> {
        let cipher = ChaCha20Poly1305::new_from_slice(&self.0)
            .map_err(|e| VaultError::Encryption(e.to_string()))?;

        cipher
            .encrypt(Nonce::from_slice(&nonce.0), Payload { msg: plaintext, aad })
            .map_err(|e| VaultError::Encryption(e.to_string()))
    }

    /// Decrypt data with this key.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        aad: &[u8],
        nonce: &VaultNonce,
    ) -> Result<Zeroizing<Vec<u8>>> {
        let cipher = ChaCha20Poly1305::new_from_slice(&self.0)
            .map_err(|e| VaultError::Decryption(e.to_string()))?;

        cipher
            .decrypt(Nonce::from_slice(&nonce.0), Payload { msg: ciphertext, aad })
            .map(Zeroizing::new)
            .map_err(|e| VaultError::Decryption(e.to_string()))
    }
}

impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VaultKey(<redacted>)")
    }
}

/// A 96-bit nonce for ChaCha20-Poly1305.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultNonce(pub [u8; 12]);

impl VaultNonce {
    /// Generate a new random nonce from the given provider.
    pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        let mut bytes = [0u8; 12];
        rng.try_fill_bytes(&mut bytes)
            .map_err(|e| VaultError::Randomness(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 12] {
        &self.0
    }
}
