//! # Account Namespace
//!
//! Company key lifecycle: create, rotate, revoke. [`KeyV1`] is the resulting
//! key state as the ledger reports it.

use katena_core::identity::validate_uuid_v4;
use katena_core::{Fqid, ValidationError};
use katena_crypto::Ed25519PublicKey;
use serde::{Deserialize, Serialize};

use crate::tx_data::{category, TxDataKind};

pub const NAMESPACE: &str = "account";
pub const NOUN_KEY: &str = "key";

/// Role of an ordinary signing key.
pub const DEFAULT_ROLE_ID: &str = "default";

/// Role of a key allowed to manage the company's other keys.
pub const COMPANY_ADMIN_ROLE_ID: &str = "company_admin";

/// `account.key`
pub fn key_category() -> String {
    category(NAMESPACE, NOUN_KEY)
}

/// Roles are lower-case snake_case identifiers.
///
/// Keeping them to `[a-z_]` means the signed bytes never contain characters
/// that JSON encoders disagree on escaping (`<`, `>`, `&`).
fn validate_role(role: &str) -> Result<(), ValidationError> {
    if role.is_empty() {
        return Err(ValidationError::Missing { field: "role" });
    }
    if !role.bytes().all(|b| b.is_ascii_lowercase() || b == b'_') {
        return Err(ValidationError::Malformed {
            field: "role",
            reason: format!("{role:?} must contain only a-z and '_'"),
        });
    }
    Ok(())
}

/// Key state as stored on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyV1 {
    pub fqid: Fqid,
    pub public_key: Ed25519PublicKey,
    pub is_active: bool,
    pub role: String,
}

/// Register a new key for the signer's company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyCreateV1 {
    pub id: String,
    pub public_key: Ed25519PublicKey,
    pub role: String,
}

impl KeyCreateV1 {
    pub fn new(
        id: impl Into<String>,
        public_key: Ed25519PublicKey,
        role: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let key = Self {
            id: id.into(),
            public_key,
            role: role.into(),
        };
        key.validate_fields()?;
        Ok(key)
    }
}

impl TxDataKind for KeyCreateV1 {
    const NAMESPACE: &'static str = NAMESPACE;
    const NOUN: &'static str = NOUN_KEY;
    const SUBTYPE: &'static str = "create";
    const VERSION: &'static str = "v1";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        validate_uuid_v4("id", &self.id)?;
        validate_role(&self.role)
    }
}

/// Replace the public key of an existing key entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyRotateV1 {
    pub id: String,
    pub public_key: Ed25519PublicKey,
}

impl KeyRotateV1 {
    pub fn new(id: impl Into<String>, public_key: Ed25519PublicKey) -> Result<Self, ValidationError> {
        let key = Self {
            id: id.into(),
            public_key,
        };
        key.validate_fields()?;
        Ok(key)
    }
}

impl TxDataKind for KeyRotateV1 {
    const NAMESPACE: &'static str = NAMESPACE;
    const NOUN: &'static str = NOUN_KEY;
    const SUBTYPE: &'static str = "rotate";
    const VERSION: &'static str = "v1";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        validate_uuid_v4("id", &self.id)
    }
}

/// Deactivate a key entity. `public_key` names the key being revoked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyRevokeV1 {
    pub id: String,
    pub public_key: Ed25519PublicKey,
}

impl KeyRevokeV1 {
    pub fn new(id: impl Into<String>, public_key: Ed25519PublicKey) -> Result<Self, ValidationError> {
        let key = Self {
            id: id.into(),
            public_key,
        };
        key.validate_fields()?;
        Ok(key)
    }
}

impl TxDataKind for KeyRevokeV1 {
    const NAMESPACE: &'static str = NAMESPACE;
    const NOUN: &'static str = NOUN_KEY;
    const SUBTYPE: &'static str = "revoke";
    const VERSION: &'static str = "v1";

    fn id(&self) -> &str {
        &self.id
    }

    fn validate_fields(&self) -> Result<(), ValidationError> {
        validate_uuid_v4("id", &self.id)
    }
}
