//! # Certify Namespace
//!
//! Certificates (raw bytes or an Ed25519 signature over an off-chain
//! document) and NaCl-box sealed secrets.

use katena_core::encoding::base64_bytes;
use katena_core::identity::validate_uuid_v4;
use katena_core::ValidationError;
use katena_crypto::{BoxNonce, Ed25519PublicKey, Ed25519Signature, X25519PublicKey};
use serde::{Deserialize, Serialize};

use crate::tx_data::{category, check_len, TxDataKind};

pub const NAMESPACE: &str = "certify";
pub const NOUN_CERTIFICATE: &str = "certificate";
pub const NOUN_SECRET: &str = "secret";

/// Largest certificate value or secret content, in bytes.
pub const MAX_CONTENT_LEN: usize = 128;

/// `certify.certificate`
pub fn certificate_category() -> String {
    category(NAMESPACE, NOUN_CERTIFICATE)
}

/// `certify.secret`
pub fn secret_category() -> String {
    category(NAMESPACE, NOUN_SECRET)
}

/// A certificate carrying raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateRawV1 {
    pub id: String,
    #[serde(with = "base64_bytes")]
    pub value: Vec<u8>,
}

impl CertificateRawV1 {
    pub fn new(id: impl Into<String>, value: impl Into<Vec<u8>>) -> Result<Self, ValidationError> {
        let cert = Self {
            id: id.into(),
            value: value.into(),
        };
        cert.validate_fields()?;
        Ok(cert)
    }
}

impl TxDataKind for CertificateRawV1 {
    const NAMESPACE: &'static str = NAMESPACE;
    const NOUN: &'static str = NOUN_CERTIFICATE;
    const SUBTYPE: &'static str = "raw";
    const VERSION: &'static str = "v1";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        validate_uuid_v4("id", &self.id)?;
        check_len("value", &self.value, 1, MAX_CONTENT_LEN)
    }
}

/// A certificate made of an Ed25519 signature and the key that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateEd25519V1 {
    pub id: String,
    pub signer: Ed25519PublicKey,
    pub signature: Ed25519Signature,
}

impl CertificateEd25519V1 {
    pub fn new(
        id: impl Into<String>,
        signer: Ed25519PublicKey,
        signature: Ed25519Signature,
    ) -> Result<Self, ValidationError> {
        let cert = Self {
            id: id.into(),
            signer,
            signature,
        };
        cert.validate_fields()?;
        Ok(cert)
    }
}

impl TxDataKind for CertificateEd25519V1 {
    const NAMESPACE: &'static str = NAMESPACE;
    const NOUN: &'static str = NOUN_CERTIFICATE;
    const SUBTYPE: &'static str = "ed25519";
    const VERSION: &'static str = "v1";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        validate_uuid_v4("id", &self.id)
    }
}

/// Content sealed with a NaCl box for a recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretNaclBoxV1 {
    pub id: String,
    pub sender: X25519PublicKey,
    pub nonce: BoxNonce,
    #[serde(with = "base64_bytes")]
    pub content: Vec<u8>,
}

impl SecretNaclBoxV1 {
    pub fn new(
        id: impl Into<String>,
        sender: X25519PublicKey,
        nonce: BoxNonce,
        content: impl Into<Vec<u8>>,
    ) -> Result<Self, ValidationError> {
        let secret = Self {
            id: id.into(),
            sender,
            nonce,
            content: content.into(),
        };
        secret.validate_fields()?;
        Ok(secret)
    }
}

impl TxDataKind for SecretNaclBoxV1 {
    const NAMESPACE: &'static str = NAMESPACE;
    const NOUN: &'static str = NOUN_SECRET;
    const SUBTYPE: &'static str = "nacl_box";
    const VERSION: &'static str = "v1";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        validate_uuid_v4("id", &self.id)?;
        check_len("content", &self.content, 1, MAX_CONTENT_LEN)
    }
}
