//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::collections::VecDeque;

use attest_core::{
    generate_credentials, KeyPairFactory, PrivateCredentials, PublicCredentials, SignedPlaintext,
};
use rand::rngs::StdRng;
use rand::{CryptoRng, RngCore, SeedableRng};

/// A participant with deterministic credentials.
pub struct TestFixture {
    pub credentials: PrivateCredentials,
}

impl TestFixture {
    /// Create a new test fixture with random credentials.
    pub fn new() -> Self {
        Self {
            credentials: PrivateCredentials::generate("https://ex.org/pub", "https://ex.org/priv")
                .expect("operating system randomness"),
        }
    }

    /// Create with deterministic credentials from a seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut factory = KeyPairFactory::new(StdRng::seed_from_u64(seed));
        let credentials = generate_credentials(
            &mut factory,
            format!("https://ex.org/{seed}/pub"),
            format!("https://ex.org/{seed}/priv"),
        )
        .expect("seeded randomness");
        Self { credentials }
    }

    /// Get the participant's public credentials.
    pub fn public(&self) -> &PublicCredentials {
        self.credentials.public()
    }

    /// Sign a plaintext.
    pub fn sign(&self, plaintext: &[u8]) -> SignedPlaintext {
        SignedPlaintext::sign(&self.credentials, plaintext.to_vec())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count as u64).map(TestFixture::with_seed).collect()
}

/// A randomness provider that replays fixed bytes, then fails.
///
/// Lets a test choose the exact seed and ID a factory produces, or exercise
/// the failure path after a given number of draws.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    bytes: VecDeque<u8>,
}

impl ScriptedRng {
    pub fn new(bytes: impl IntoIterator<Item = u8>) -> Self {
        Self {
            bytes: bytes.into_iter().collect(),
        }
    }

    /// Script for one key seed followed by one unique ID.
    pub fn credentials(seed: [u8; 32], id: [u8; 16]) -> Self {
        Self::new(seed.into_iter().chain(id))
    }

    /// Bytes not yet drawn.
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill_bytes(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill_bytes(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("{e}");
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        if self.bytes.len() < dest.len() {
            return Err(rand::Error::new("script exhausted"));
        }
        let n = dest.len();
        for (slot, byte) in dest.iter_mut().zip(self.bytes.drain(..n)) {
            *slot = byte;
        }
        Ok(())
    }
}

impl CryptoRng for ScriptedRng {}
