//! Golden test vectors for deterministic verification.
//!
//! Ed25519 vectors from RFC 8032 section 7.1. They pin key derivation and
//! signing so envelopes produced here verify under any conforming
//! implementation, and vice versa.

use attest_core::{PrivateKey, PublicKey, SignedPlaintext};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// 32-byte secret seed (hex).
    pub secret_key: &'static str,
    /// Expected public key (hex).
    pub public_key: &'static str,
    /// Message (hex).
    pub message: &'static str,
    /// Expected signature (hex).
    pub signature: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "RFC 8032 test 1 (empty message)",
            secret_key: "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            public_key: "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
            message: "",
            signature: "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
        },
        GoldenVector {
            name: "RFC 8032 test 2 (one byte)",
            secret_key: "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
            public_key: "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
            message: "72",
            signature: "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
        },
        GoldenVector {
            name: "RFC 8032 test 3 (two bytes)",
            secret_key: "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
            public_key: "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
            message: "af82",
            signature: "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
        },
    ]
}

/// The private key of a vector.
pub fn private_key_from_vector(vector: &GoldenVector) -> PrivateKey {
    let seed: [u8; 32] = hex::decode(vector.secret_key)
        .expect("vector secret key is hex")
        .try_into()
        .expect("vector secret key is 32 bytes");
    PrivateKey::from_seed(&seed)
}

/// The envelope a vector describes, built from its expected values.
pub fn envelope_from_vector(vector: &GoldenVector) -> SignedPlaintext {
    SignedPlaintext {
        plaintext: hex::decode(vector.message).expect("vector message is hex").into(),
        signature: hex::decode(vector.signature)
            .expect("vector signature is hex")
            .into(),
        public_key_ed25519: PublicKey::from_hex(vector.public_key)
            .expect("vector public key is valid"),
    }
}

/// Check every vector: key derivation, signing, and envelope verification.
///
/// Returns `(name, passed, detail)` for each vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .into_iter()
        .map(|v| {
            let private = private_key_from_vector(&v);
            let envelope = envelope_from_vector(&v);

            let public_hex = private.public_key().to_hex();
            let signature_hex = hex::encode(private.sign(&envelope.plaintext));

            let detail = if public_hex != v.public_key {
                format!("public key {public_hex}")
            } else if signature_hex != v.signature {
                format!("signature {signature_hex}")
            } else if !envelope.verify() {
                "envelope rejected".to_string()
            } else {
                "ok".to_string()
            };
            (v.name.to_string(), detail == "ok", detail)
        })
        .collect()
}
