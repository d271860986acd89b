//! # X25519 Box Keys
//!
//! Only the public half of a NaCl box exchange appears in a transaction: the
//! sender's X25519 public key and the 24-byte box nonce. Sealing and opening
//! happen outside this crate.

use crate::bytes::fixed_bytes;

pub const X25519_PUBLIC_KEY_LEN: usize = 32;
pub const BOX_NONCE_LEN: usize = 24;

fixed_bytes!(
    /// The sender's X25519 public key.
    X25519PublicKey,
    X25519_PUBLIC_KEY_LEN,
    "sender"
);

fixed_bytes!(
    /// A NaCl box nonce.
    BoxNonce,
    BOX_NONCE_LEN,
    "nonce"
);

#[cfg(test)]
mod tests {
    use super::*;
    use katena_core::ValidationError;

    #[test]
    fn sender_key_from_base64() {
        let b64 = katena_core::encoding::to_base64(&[9u8; 32]);
        let key = X25519PublicKey::from_base64(&b64).unwrap();
        assert_eq!(key.as_bytes(), &[9u8; 32]);
        assert_eq!(key.to_hex(), "09".repeat(32));
    }

    #[test]
    fn sender_key_wrong_length() {
        let b64 = katena_core::encoding::to_base64(&[9u8; 31]);
        assert_eq!(
            X25519PublicKey::from_base64(&b64).unwrap_err(),
            ValidationError::InvalidLength {
                field: "sender",
                expected: 32,
                actual: 31
            }
        );
    }

    #[test]
    fn nonce_is_24_bytes() {
        assert!(BoxNonce::from_hex(&"AA".repeat(24)).is_ok());
        assert!(matches!(
            BoxNonce::from_hex(&"AA".repeat(23)).unwrap_err(),
            ValidationError::InvalidLength { field: "nonce", expected: 24, actual: 23 }
        ));
    }

    #[test]
    fn serde_uses_upper_hex() {
        let nonce = BoxNonce::from_bytes([0xcd; 24]);
        let json = serde_json::to_string(&nonce).unwrap();
        assert_eq!(json, format!("\"{}\"", "CD".repeat(24)));
        let back: BoxNonce = serde_json::from_str(&json.to_lowercase()).unwrap();
        assert_eq!(back, nonce);
    }
}
