//! Golden vectors for the persisted settings format.
//!
//! Settings are stored as CBOR. These vectors pin the exact bytes so a
//! database written by one build stays readable by the next.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A golden settings value.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Settings key the value is stored under.
    pub key: &'static str,
    /// The value.
    pub value: GoldenValue,
    /// Expected CBOR encoding (hex).
    pub expected_cbor: &'static str,
}

/// A value in one of the stored types.
#[derive(Debug, Clone, PartialEq)]
pub enum GoldenValue {
    Level(u32),
    Token(&'static str),
}

/// Get all golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "default last level reward",
            key: "last_level_reward",
            value: GoldenValue::Level(1),
            expected_cbor: "01",
        },
        GoldenVector {
            name: "last level reward past one byte",
            key: "last_level_reward",
            value: GoldenValue::Level(30),
            expected_cbor: "181e",
        },
        GoldenVector {
            name: "short auth token",
            key: "auth_token",
            value: GoldenValue::Token("abc"),
            expected_cbor: "63616263",
        },
        GoldenVector {
            name: "empty auth token",
            key: "auth_token",
            value: GoldenValue::Token(""),
            expected_cbor: "60",
        },
    ]
}

/// Encode a value the way the settings store does.
pub fn encode<T: Serialize>(value: &T) -> Vec<u8> {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = ciborium::into_writer(value, &mut buf);
    buf
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    ciborium::from_reader(bytes).ok()
}

impl GoldenVector {
    /// CBOR encoding of the vector's value.
    pub fn encoded(&self) -> Vec<u8> {
        match &self.value {
            GoldenValue::Level(level) => encode(level),
            GoldenValue::Token(token) => encode(&token.to_string()),
        }
    }

    pub fn expected_bytes(&self) -> Vec<u8> {
        hex::decode(self.expected_cbor).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectors_encode_as_expected() {
        for vector in all_vectors() {
            assert_eq!(
                hex::encode(vector.encoded()),
                vector.expected_cbor,
                "{}",
                vector.name
            );
        }
    }

    #[test]
    fn test_vectors_decode_back() {
        for vector in all_vectors() {
            let bytes = vector.expected_bytes();
            let decoded = match vector.value {
                GoldenValue::Level(_) => decode::<u32>(&bytes).map(GoldenValue::Level),
                GoldenValue::Token(expected) => decode::<String>(&bytes)
                    .filter(|token| token == expected)
                    .map(|_| GoldenValue::Token(expected)),
            };
            assert_eq!(decoded, Some(vector.value.clone()), "{}", vector.name);
        }
    }
}
