//! # Fully-Qualified Identifiers
//!
//! Ledger entities are addressed by `{companyBcid}-{localId}`: a fixed-length
//! company chain id, a hyphen, then a local id (usually a UUID, which itself
//! contains hyphens). Only the first hyphen is a separator.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::ValidationError;

/// Length of a company blockchain id.
pub const COMPANY_BCID_LEN: usize = 6;

/// Separator between the company bcid and the local id.
pub const FQID_SEPARATOR: char = '-';

/// Concatenate a company bcid and a local id into a fully-qualified id.
pub fn concat_fqid(company_bcid: &str, local_id: &str) -> String {
    format!("{company_bcid}{FQID_SEPARATOR}{local_id}")
}

/// Split a fully-qualified id on its first hyphen.
///
/// Returns `None` when the string contains no separator.
pub fn split_fqid(fqid: &str) -> Option<(&str, &str)> {
    fqid.split_once(FQID_SEPARATOR)
}

/// Generate a fresh local id (UUID v4).
pub fn new_local_id() -> String {
    Uuid::new_v4().to_string()
}

/// Check that a company bcid is exactly [`COMPANY_BCID_LEN`] ASCII alphanumerics.
pub fn validate_company_bcid(company_bcid: &str) -> Result<(), ValidationError> {
    if company_bcid.is_empty() {
        return Err(ValidationError::Missing {
            field: "company_bcid",
        });
    }
    if company_bcid.len() != COMPANY_BCID_LEN {
        return Err(ValidationError::InvalidLength {
            field: "company_bcid",
            expected: COMPANY_BCID_LEN,
            actual: company_bcid.len(),
        });
    }
    if !company_bcid.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::Malformed {
            field: "company_bcid",
            reason: format!("{company_bcid:?} must be alphanumeric"),
        });
    }
    Ok(())
}

/// Check that a payload id is a version 4 UUID.
pub fn validate_uuid_v4(field: &'static str, id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::Missing { field });
    }
    let uuid = Uuid::parse_str(id).map_err(|e| ValidationError::Malformed {
        field,
        reason: e.to_string(),
    })?;
    if uuid.get_version_num() != 4 {
        return Err(ValidationError::Malformed {
            field,
            reason: format!("{id:?} is not a version 4 UUID"),
        });
    }
    Ok(())
}

/// A validated fully-qualified id.
///
/// Serializes as the plain concatenated string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fqid(String);

impl Fqid {
    /// Build a fully-qualified id from its two parts.
    pub fn new(company_bcid: &str, local_id: &str) -> Result<Self, ValidationError> {
        validate_company_bcid(company_bcid)?;
        if local_id.is_empty() {
            return Err(ValidationError::Missing { field: "local_id" });
        }
        Ok(Self(concat_fqid(company_bcid, local_id)))
    }

    /// Parse and validate a concatenated fully-qualified id.
    pub fn parse(fqid: &str) -> Result<Self, ValidationError> {
        let (company_bcid, local_id) =
            split_fqid(fqid).ok_or_else(|| ValidationError::Malformed {
                field: "fqid",
                reason: format!("{fqid:?} has no {FQID_SEPARATOR:?} separator"),
            })?;
        Self::new(company_bcid, local_id)
    }

    /// The company bcid part.
    pub fn company_bcid(&self) -> &str {
        &self.0[..COMPANY_BCID_LEN]
    }

    /// The local id part.
    pub fn local_id(&self) -> &str {
        &self.0[COMPANY_BCID_LEN + FQID_SEPARATOR.len_utf8()..]
    }

    /// The full string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fqid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Fqid {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Fqid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Fqid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Fqid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
