//! # Transaction Payloads
//!
//! [`TxData`] is the object-safe interface every payload variant exposes to
//! the envelope and the registry. Concrete variants implement [`TxDataKind`]
//! instead, which supplies the tag parts as associated constants and gets
//! `TxData` through a blanket impl, so no variant ever hand-writes its tag.
//!
//! [`UnknownTxData`] carries a payload whose tag is not registered. It keeps
//! the exact bytes it was decoded from, so re-encoding is lossless.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Debug;

use katena_core::{concat_fqid, ValidationError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::value::RawValue;

/// Build a type tag: `{namespace}.{noun}.{subtype}.{version}`.
pub fn type_tag(namespace: &str, noun: &str, subtype: &str, version: &str) -> String {
    format!("{namespace}.{noun}.{subtype}.{version}")
}

/// Build a category: `{namespace}.{noun}`.
pub fn category(namespace: &str, noun: &str) -> String {
    format!("{namespace}.{noun}")
}

/// A transaction payload.
pub trait TxData: Debug + Send + Sync + 'static {
    /// Namespace that handles this payload (`certify`, `account`, ...).
    fn namespace(&self) -> &str;

    /// Namespace plus entity noun, e.g. `certify.certificate`.
    fn category(&self) -> String;

    /// Full type tag, e.g. `certify.certificate.raw.v1`.
    fn tx_type(&self) -> String;

    /// Entity state ids this payload creates or updates, keyed by category.
    ///
    /// The ledger uses these to index transactions.
    fn state_ids(&self, signer_company_bcid: &str) -> BTreeMap<String, String>;

    /// Check every field. Called before signing.
    fn validate(&self) -> Result<(), ValidationError>;

    /// The `value` half of the `{type, value}` wrapper.
    fn to_raw_value(&self) -> Result<Box<RawValue>, serde_json::Error>;

    fn as_any(&self) -> &dyn Any;
}

/// A statically known payload variant.
pub trait TxDataKind: Serialize + DeserializeOwned + Debug + Send + Sync + 'static {
    const NAMESPACE: &'static str;
    const NOUN: &'static str;
    const SUBTYPE: &'static str;
    const VERSION: &'static str;

    /// Local id of the entity this payload addresses (a UUID v4).
    fn id(&self) -> &str;

    /// Field checks beyond what the types already guarantee.
    fn validate_fields(&self) -> Result<(), ValidationError>;

    /// Type tag this variant is registered under.
    fn tag() -> String {
        type_tag(Self::NAMESPACE, Self::NOUN, Self::SUBTYPE, Self::VERSION)
    }
}

impl<T: TxDataKind> TxData for T {
    fn namespace(&self) -> &str {
        T::NAMESPACE
    }

    fn category(&self) -> String {
        category(T::NAMESPACE, T::NOUN)
    }

    fn tx_type(&self) -> String {
        T::tag()
    }

    fn state_ids(&self, signer_company_bcid: &str) -> BTreeMap<String, String> {
        BTreeMap::from([(self.category(), concat_fqid(signer_company_bcid, self.id()))])
    }

    fn validate(&self) -> Result<(), ValidationError> {
        self.validate_fields()
    }

    fn to_raw_value(&self) -> Result<Box<RawValue>, serde_json::Error> {
        serde_json::value::to_raw_value(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A payload with an unregistered tag, kept byte-for-byte.
#[derive(Debug, Clone)]
pub struct UnknownTxData {
    tx_type: String,
    value: Box<RawValue>,
}

impl UnknownTxData {
    pub fn new(tx_type: impl Into<String>, value: Box<RawValue>) -> Self {
        Self {
            tx_type: tx_type.into(),
            value,
        }
    }

    /// The raw JSON text of the value, exactly as received.
    pub fn raw_json(&self) -> &str {
        self.value.get()
    }
}

impl TxData for UnknownTxData {
    fn namespace(&self) -> &str {
        self.tx_type.split('.').next().unwrap_or_default()
    }

    fn category(&self) -> String {
        self.tx_type.splitn(3, '.').take(2).collect::<Vec<_>>().join(".")
    }

    fn tx_type(&self) -> String {
        self.tx_type.clone()
    }

    fn state_ids(&self, _signer_company_bcid: &str) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    fn to_raw_value(&self) -> Result<Box<RawValue>, serde_json::Error> {
        Ok(self.value.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Check that a byte field's length is within `min..=max`.
pub(crate) fn check_len(
    field: &'static str,
    bytes: &[u8],
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if (min..=max).contains(&bytes.len()) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            actual: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_grammar() {
        assert_eq!(
            type_tag("certify", "certificate", "raw", "v1"),
            "certify.certificate.raw.v1"
        );
        assert_eq!(category("account", "key"), "account.key");
    }

    #[test]
    fn unknown_data_keeps_raw_bytes() {
        let raw = RawValue::from_string(r#"{ "b":1, "a":[2,3] }"#.to_string()).unwrap();
        let unknown = UnknownTxData::new("other.thing.kind.v3", raw);
        assert_eq!(unknown.raw_json(), r#"{ "b":1, "a":[2,3] }"#);
        assert_eq!(unknown.to_raw_value().unwrap().get(), r#"{ "b":1, "a":[2,3] }"#);
        assert_eq!(unknown.tx_type(), "other.thing.kind.v3");
        assert_eq!(unknown.namespace(), "other");
        assert_eq!(unknown.category(), "other.thing");
        assert!(unknown.state_ids("abcdef").is_empty());
        assert!(unknown.validate().is_ok());
    }

    #[test]
    fn check_len_bounds() {
        assert!(check_len("value", &[0; 1], 1, 128).is_ok());
        assert!(check_len("value", &[0; 128], 1, 128).is_ok());
        assert_eq!(
            check_len("value", &[0; 129], 1, 128).unwrap_err(),
            ValidationError::OutOfRange {
                field: "value",
                min: 1,
                max: 128,
                actual: 129
            }
        );
        assert!(check_len("value", &[], 1, 128).is_err());
    }
}
