//! Key pair and identifier generation from an injected randomness provider.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::crypto::KeyPair;
use crate::error::Result;
use crate::types::UniqueId;

/// Generates fresh key pairs and unique identifiers.
///
/// The randomness provider is owned by the factory. A provider failure is
/// returned as [`CoreError::RandomnessFailure`](crate::CoreError) and no key
/// material is produced.
pub struct KeyPairFactory<R> {
    rng: R,
}

impl KeyPairFactory<OsRng> {
    /// A factory backed by the operating system CSPRNG.
    pub fn os() -> Self {
        Self { rng: OsRng }
    }
}

impl<R: RngCore + CryptoRng> KeyPairFactory<R> {
    /// Create a factory over the given provider.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a fresh Ed25519 key pair.
    pub fn generate(&mut self) -> Result<KeyPair> {
        let mut seed = Zeroizing::new([0u8; 32]);
        self.rng.try_fill_bytes(&mut seed[..])?;
        Ok(KeyPair::from_seed(&seed))
    }

    /// Generate an identifier with negligible collision probability.
    pub fn generate_unique_id(&mut self) -> Result<UniqueId> {
        let mut bytes = [0u8; 16];
        self.rng.try_fill_bytes(&mut bytes)?;
        Ok(UniqueId::from_random_bytes(bytes))
    }

    /// Release the provider.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// A provider that always fails.
    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!("only try_fill_bytes is used")
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!("only try_fill_bytes is used")
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!("only try_fill_bytes is used")
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new("entropy pool unavailable"))
        }
    }

    impl CryptoRng for BrokenRng {}

    #[test]
    fn test_seeded_factory_is_deterministic() {
        let mut f1 = KeyPairFactory::new(StdRng::seed_from_u64(7));
        let mut f2 = KeyPairFactory::new(StdRng::seed_from_u64(7));

        assert_eq!(f1.generate().unwrap(), f2.generate().unwrap());
        assert_eq!(
            f1.generate_unique_id().unwrap(),
            f2.generate_unique_id().unwrap()
        );
    }

    #[test]
    fn test_successive_calls_differ() {
        let mut factory = KeyPairFactory::new(StdRng::seed_from_u64(1));
        let a = factory.generate().unwrap();
        let b = factory.generate().unwrap();
        assert_ne!(a.public, b.public);

        let id1 = factory.generate_unique_id().unwrap();
        let id2 = factory.generate_unique_id().unwrap();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_os_factory_generates() {
        let mut factory = KeyPairFactory::os();
        let pair = factory.generate().unwrap();
        assert_eq!(pair.private.public_key(), pair.public);
    }

    #[test]
    fn test_randomness_failure_is_reported() {
        let mut factory = KeyPairFactory::new(BrokenRng);
        assert!(matches!(
            factory.generate(),
            Err(CoreError::RandomnessFailure(_))
        ));
        assert!(matches!(
            factory.generate_unique_id(),
            Err(CoreError::RandomnessFailure(_))
        ));
    }
}
