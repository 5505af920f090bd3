//! Locked credentials: a private credential record encrypted for storage.
//!
//! The record is the only form in which [`PrivateCredentials`] should leave
//! the holder's memory. The holder's public key stays readable so a stored
//! record can be matched to its identity without the vault key.

use attest_core::{Encoding, PrivateCredentials, PublicKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use crate::crypto::{VaultKey, VaultNonce};
use crate::error::{Result, VaultError};

/// Domain separation for the authenticated data.
const AAD_DOMAIN: &[u8] = b"attest-vault-v1";

/// Format identifier for locked records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum VaultFormat {
    /// ChaCha20-Poly1305 over CBOR-encoded credentials.
    ChaCha20Poly1305 = 1,
}

/// Encrypted private credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedCredentials {
    /// Encryption algorithm used.
    pub format: VaultFormat,

    /// Public key of the locked identity. Authenticated, not encrypted.
    pub public_key: PublicKey,

    /// Nonce used for encryption (unique per lock).
    pub nonce: VaultNonce,

    /// The encrypted record (includes authentication tag).
    pub ciphertext: Vec<u8>,
}

impl LockedCredentials {
    /// Encrypt credentials with a fresh nonce from the operating system CSPRNG.
    pub fn lock(credentials: &PrivateCredentials, key: &VaultKey) -> Result<Self> {
        Self::lock_with(credentials, key, &mut OsRng)
    }

    /// Encrypt credentials with a nonce drawn from `rng`.
    pub fn lock_with<R: RngCore + CryptoRng>(
        credentials: &PrivateCredentials,
        key: &VaultKey,
        rng: &mut R,
    ) -> Result<Self> {
        let public_key = credentials.public_key();
        let nonce = VaultNonce::generate_with(rng)?;
        let plaintext = zeroize::Zeroizing::new(credentials.to_bytes(Encoding::Cbor)?);
        let ciphertext = key.encrypt(&plaintext, &aad(&public_key), &nonce)?;

        Ok(Self {
            format: VaultFormat::ChaCha20Poly1305,
            public_key,
            nonce,
            ciphertext,
        })
    }

    /// Decrypt with the given key.
    pub fn unlock(&self, key: &VaultKey) -> Result<PrivateCredentials> {
        match self.format {
            VaultFormat::ChaCha20Poly1305 => {
                let plaintext = key.decrypt(&self.ciphertext, &aad(&self.public_key), &self.nonce)?;
                let credentials = PrivateCredentials::from_bytes(&plaintext, Encoding::Cbor)?;
                if credentials.public_key() != self.public_key {
                    return Err(VaultError::Decryption(
                        "locked record holds a different identity".into(),
                    ));
                }
                Ok(credentials)
            }
        }
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| VaultError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e| VaultError::Serialization(e.to_string()))
    }
}

fn aad(public_key: &PublicKey) -> Vec<u8> {
    let mut aad = Vec::with_capacity(AAD_DOMAIN.len() + 32);
    aad.extend_from_slice(AAD_DOMAIN);
    aad.extend_from_slice(public_key.as_bytes());
    aad
}

#[cfg(test)]
mod tests {
    use super::*;
    use attest_core::{generate_credentials, KeyPairFactory};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn credentials(seed: u64) -> PrivateCredentials {
        let mut factory = KeyPairFactory::new(StdRng::seed_from_u64(seed));
        generate_credentials(&mut factory, "https://ex.org/pub", "https://ex.org/priv").unwrap()
    }

    #[test]
    fn test_lock_unlock_roundtrip() {
        let creds = credentials(1);
        let key = VaultKey::generate().unwrap();

        let locked = LockedCredentials::lock(&creds, &key).unwrap();
        assert_eq!(locked.public_key, creds.public_key());

        let unlocked = locked.unlock(&key).unwrap();
        assert_eq!(unlocked, creds);
    }

    #[test]
    fn test_locked_serialization() {
        let creds = credentials(2);
        let key = VaultKey::generate().unwrap();
        let locked = LockedCredentials::lock(&creds, &key).unwrap();

        let bytes = locked.to_bytes().unwrap();
        let recovered = LockedCredentials::from_bytes(&bytes).unwrap();
        assert_eq!(locked, recovered);
        assert_eq!(recovered.unlock(&key).unwrap(), creds);
    }

    #[test]
    fn test_wrong_key_fails() {
        let creds = credentials(3);
        let locked = LockedCredentials::lock(&creds, &VaultKey::from_bytes([1; 32])).unwrap();

        assert!(matches!(
            locked.unlock(&VaultKey::from_bytes([2; 32])),
            Err(VaultError::Decryption(_))
        ));
    }

    #[test]
    fn test_swapped_public_key_fails() {
        let key = VaultKey::from_bytes([3; 32]);
        let mut locked = LockedCredentials::lock(&credentials(4), &key).unwrap();
        locked.public_key = credentials(5).public_key();

        assert!(locked.unlock(&key).is_err());
    }

    #[test]
    fn test_ciphertext_hides_private_key() {
        let creds = credentials(6);
        let key = VaultKey::from_bytes([4; 32]);
        let locked = LockedCredentials::lock(&creds, &key).unwrap();

        let secret = creds.private_key_ed25519.to_keypair_bytes();
        let bytes = locked.to_bytes().unwrap();
        assert!(!bytes.windows(32).any(|w| w == &secret[..32]));
    }

    proptest! {
        #[test]
        fn test_lock_roundtrip_any_key(seed in any::<u64>(), key in any::<[u8; 32]>()) {
            let creds = credentials(seed);
            let key = VaultKey::from_bytes(key);
            let locked = LockedCredentials::lock(&creds, &key).unwrap();
            prop_assert_eq!(locked.unlock(&key).unwrap(), creds);
        }

        #[test]
        fn test_flipped_ciphertext_bit_fails(index in 0usize..64, bit in 0u8..8) {
            let key = VaultKey::from_bytes([8; 32]);
            let mut locked = LockedCredentials::lock(&credentials(8), &key).unwrap();
            let index = index % locked.ciphertext.len();
            locked.ciphertext[index] ^= 1 << bit;
            prop_assert!(locked.unlock(&key).is_err());
        }
    }

    #[test]
    fn test_nonce_differs_per_lock() {
        let creds = credentials(7);
        let key = VaultKey::from_bytes([5; 32]);
        let a = LockedCredentials::lock(&creds, &key).unwrap();
        let b = LockedCredentials::lock(&creds, &key).unwrap();
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }
}
