//! # Byte Encodings
//!
//! Every byte field on the wire uses one fixed encoding:
//!
//! - Keys, signatures, nonces and hashes: upper-case hexadecimal.
//!   Decoding accepts either case.
//! - Opaque content (certificate values, sealed secrets): standard base64
//!   with padding, via the [`base64_bytes`] serde helper.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// Encode bytes as upper-case hex.
pub fn to_hex_upper(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

/// Decode a hex string of exactly `N` bytes.
pub fn fixed_from_hex<const N: usize>(
    field: &'static str,
    s: &str,
) -> Result<[u8; N], ValidationError> {
    let bytes = hex::decode(s.trim()).map_err(|e| ValidationError::Malformed {
        field,
        reason: e.to_string(),
    })?;
    fixed_from_slice(field, &bytes)
}

/// Copy a slice into an array of exactly `N` bytes.
pub fn fixed_from_slice<const N: usize>(
    field: &'static str,
    bytes: &[u8],
) -> Result<[u8; N], ValidationError> {
    bytes
        .try_into()
        .map_err(|_| ValidationError::InvalidLength {
            field,
            expected: N,
            actual: bytes.len(),
        })
}

/// Decode a standard base64 string.
pub fn from_base64(field: &'static str, s: &str) -> Result<Vec<u8>, ValidationError> {
    BASE64
        .decode(s.trim())
        .map_err(|e| ValidationError::Malformed {
            field,
            reason: e.to_string(),
        })
}

/// Encode bytes as standard base64.
pub fn to_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Variable-length bytes that serialize as upper-case hex (e.g. tx hashes).
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct HexBytes(pub Vec<u8>);

impl HexBytes {
    /// Parse from a hex string of any length.
    pub fn from_hex(s: &str) -> Result<Self, ValidationError> {
        hex::decode(s.trim())
            .map(Self)
            .map_err(|e| ValidationError::Malformed {
                field: "hex",
                reason: e.to_string(),
            })
    }

    /// Render as upper-case hex.
    pub fn to_hex(&self) -> String {
        to_hex_upper(&self.0)
    }

    /// Access the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for HexBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Display for HexBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for HexBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HexBytes({})", self.to_hex())
    }
}

impl Serialize for HexBytes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HexBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde helper for `Vec<u8>` fields carried as standard base64.
///
/// ```ignore
/// #[serde(with = "katena_core::encoding::base64_bytes")]
/// pub value: Vec<u8>,
/// ```
pub mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_base64(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        from_base64("base64", &s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_upper_case_and_decodes_either_case() {
        assert_eq!(to_hex_upper(&[0xde, 0xad, 0x0b]), "DEAD0B");
        let lower: [u8; 3] = fixed_from_hex("nonce", "dead0b").unwrap();
        let upper: [u8; 3] = fixed_from_hex("nonce", "DEAD0B").unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn fixed_hex_rejects_wrong_length() {
        let err = fixed_from_hex::<4>("nonce", "AABB").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidLength {
                field: "nonce",
                expected: 4,
                actual: 2
            }
        );
        assert!(matches!(
            fixed_from_hex::<1>("nonce", "ZZ").unwrap_err(),
            ValidationError::Malformed { .. }
        ));
    }

    #[test]
    fn hex_bytes_serde() {
        let h = HexBytes(vec![1, 2, 254]);
        assert_eq!(serde_json::to_string(&h).unwrap(), r#""0102FE""#);
        let back: HexBytes = serde_json::from_str(r#""0102fe""#).unwrap();
        assert_eq!(back, h);
        assert!(serde_json::from_str::<HexBytes>(r#""0""#).is_err());
    }

    #[test]
    fn base64_helper_uses_standard_alphabet_with_padding() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Holder {
            #[serde(with = "base64_bytes")]
            value: Vec<u8>,
        }
        let h = Holder {
            value: vec![0xfb, 0xff, 0x01],
        };
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, r#"{"value":"+/8B"}"#);
        assert_eq!(serde_json::from_str::<Holder>(&json).unwrap(), h);
        assert!(serde_json::from_str::<Holder>(r#"{"value":"***"}"#).is_err());
    }
}
