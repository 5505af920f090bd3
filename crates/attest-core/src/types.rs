//! Strong type definitions for Attest.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// An opaque, collision-resistant identity identifier.
///
/// Built from 122 random bits (UUID version 4) drawn from the caller's
/// randomness provider, so it needs no coordinator and no network.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueId(Uuid);

impl UniqueId {
    /// Build from 16 random bytes. Version and variant bits are overwritten.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    /// Get the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UniqueId({})", self.0)
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UniqueId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_id_is_v4() {
        let id = UniqueId::from_random_bytes([0x42; 16]);
        assert_eq!(id.as_uuid().get_version_num(), 4);
    }

    #[test]
    fn test_unique_id_display_roundtrip() {
        let id = UniqueId::from_random_bytes([0xab; 16]);
        let recovered: UniqueId = id.to_string().parse().unwrap();
        assert_eq!(id, recovered);
    }

    #[test]
    fn test_unique_id_debug() {
        let id = UniqueId::from_random_bytes([0xcd; 16]);
        let debug = format!("{:?}", id);
        assert!(debug.starts_with("UniqueId("));
    }

    #[test]
    fn test_unique_id_json_is_string() {
        let id = UniqueId::from_random_bytes([0x01; 16]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }
}
