//! Proptest generators for property-based testing.

use proptest::prelude::*;

use attest_core::{
    generate_credentials, KeyPair, KeyPairFactory, PrivateCredentials, PublicKey, SignedPlaintext,
    UniqueId,
};

use crate::fixtures::ScriptedRng;

/// Generate a random key pair.
pub fn key_pair() -> impl Strategy<Value = KeyPair> {
    any::<[u8; 32]>().prop_map(|seed| KeyPair::from_seed(&seed))
}

/// Generate a random PublicKey (always on the curve).
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    key_pair().prop_map(|kp| kp.public)
}

/// Generate a random UniqueId.
pub fn unique_id() -> impl Strategy<Value = UniqueId> {
    any::<[u8; 16]>().prop_map(UniqueId::from_random_bytes)
}

/// Generate a locator URL.
pub fn url() -> impl Strategy<Value = String> {
    "https://[a-z]{1,12}\\.org/[a-z0-9/_-]{0,24}".prop_map(String::from)
}

/// Generate plaintext bytes of specified max length.
pub fn plaintext(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate complete private credentials.
pub fn credentials() -> impl Strategy<Value = PrivateCredentials> {
    (any::<[u8; 32]>(), any::<[u8; 16]>(), url(), url()).prop_map(
        |(seed, id, public_url, private_url)| {
            let mut factory = KeyPairFactory::new(ScriptedRng::credentials(seed, id));
            generate_credentials(&mut factory, public_url, private_url)
                .expect("script covers one key pair and one id")
        },
    )
}

/// Generate credentials with an envelope they signed.
pub fn signed_plaintext(
    max_len: usize,
) -> impl Strategy<Value = (PrivateCredentials, SignedPlaintext)> {
    (credentials(), plaintext(max_len)).prop_map(|(creds, plaintext)| {
        let signed = SignedPlaintext::sign(&creds, plaintext);
        (creds, signed)
    })
}
