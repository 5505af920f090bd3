//! Serialization boundary: field-named encodings for identity records.
//!
//! Two encodings are supported:
//! - JSON (default): byte fields are standard base64 strings, so records stay
//!   readable when committed to a ledger and portable across implementations.
//! - CBOR: byte fields are native byte strings.
//!
//! Field names are stable and identical in both encodings.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, DecodeError, Result};

/// Wire encoding for records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    #[default]
    Json,
    Cbor,
}

impl Encoding {
    /// File extension used when a record is stored as a file.
    pub fn extension(self) -> &'static str {
        match self {
            Encoding::Json => "json",
            Encoding::Cbor => "cbor",
        }
    }
}

/// Encode a record.
pub fn encode<T: Serialize>(value: &T, encoding: Encoding) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Json => {
            serde_json::to_vec_pretty(value).map_err(|e| CoreError::Encoding(e.to_string()))
        }
        Encoding::Cbor => {
            let mut buf = Vec::new();
            ciborium::into_writer(value, &mut buf)
                .map_err(|e| CoreError::Encoding(e.to_string()))?;
            Ok(buf)
        }
    }
}

/// Decode a record. Fails on missing fields, wrong field types or truncation.
pub fn decode<T: DeserializeOwned>(
    bytes: &[u8],
    encoding: Encoding,
) -> std::result::Result<T, DecodeError> {
    match encoding {
        Encoding::Json => Ok(serde_json::from_slice(bytes)?),
        Encoding::Cbor => {
            ciborium::from_reader(bytes).map_err(|e| DecodeError::Cbor(e.to_string()))
        }
    }
}

/// Serde adapter for variable-length byte fields.
///
/// Human-readable formats get a base64 string (`null` reads as empty),
/// binary formats get a byte string.
pub(crate) mod base64_bytes {
    use std::fmt;

    use base64::{engine::general_purpose::STANDARD, Engine};
    use serde::de::{self, SeqAccess, Visitor};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<T, S>(bytes: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: AsRef<[u8]>,
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&STANDARD.encode(bytes.as_ref()))
        } else {
            serializer.serialize_bytes(bytes.as_ref())
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: From<Vec<u8>>,
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let encoded = Option::<String>::deserialize(deserializer)?;
            match encoded {
                Some(s) => STANDARD.decode(s).map(T::from).map_err(de::Error::custom),
                None => Ok(T::from(Vec::new())),
            }
        } else {
            deserializer.deserialize_byte_buf(ByteBufVisitor).map(T::from)
        }
    }

    struct ByteBufVisitor;

    impl<'de> Visitor<'de> for ByteBufVisitor {
        type Value = Vec<u8>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a byte string")
        }

        fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
            Ok(v.to_vec())
        }

        fn visit_byte_buf<E: de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut out = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(b) = seq.next_element::<u8>()? {
                out.push(b);
            }
            Ok(out)
        }
    }
}
