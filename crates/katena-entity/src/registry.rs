//! # TxData Type Registry
//!
//! Maps type tags to decoders. The envelope never names a concrete payload
//! type on the read path: it hands the tag and the raw `value` to the
//! registry and gets back an `Arc<dyn TxData>`.
//!
//! Registration takes `&mut self`; decoding takes `&self`. Populate the
//! registry first, then share it (`&TxDataRegistry` or `Arc`).

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::account::{KeyCreateV1, KeyRevokeV1, KeyRotateV1};
use crate::certify::{CertificateEd25519V1, CertificateRawV1, SecretNaclBoxV1};
use crate::error::TxError;
use crate::tx_data::{TxData, TxDataKind, UnknownTxData};

/// Decodes the `value` of a `{type, value}` wrapper into a payload.
pub type TxDataDecoder =
    Box<dyn Fn(&RawValue) -> Result<Arc<dyn TxData>, serde_json::Error> + Send + Sync>;

/// The `{type, value}` form a payload takes on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxDataWrapper {
    #[serde(rename = "type")]
    pub tx_type: String,
    pub value: Box<RawValue>,
}

/// What to do with a tag nobody registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownTypePolicy {
    /// Keep the payload as [`UnknownTxData`].
    #[default]
    Passthrough,
    /// Fail with [`TxError::UnknownType`].
    Reject,
}

pub struct TxDataRegistry {
    decoders: HashMap<String, TxDataDecoder>,
    policy: UnknownTypePolicy,
}

impl TxDataRegistry {
    /// An empty registry.
    pub fn new(policy: UnknownTypePolicy) -> Self {
        Self {
            decoders: HashMap::new(),
            policy,
        }
    }

    /// A passthrough registry with every v1 certify and account kind.
    pub fn with_default_types() -> Self {
        let mut registry = Self::new(UnknownTypePolicy::Passthrough);
        registry.register_default_types();
        registry
    }

    /// Register every v1 certify and account kind.
    pub fn register_default_types(&mut self) {
        self.register_kind::<CertificateRawV1>();
        self.register_kind::<CertificateEd25519V1>();
        self.register_kind::<SecretNaclBoxV1>();
        self.register_kind::<KeyCreateV1>();
        self.register_kind::<KeyRotateV1>();
        self.register_kind::<KeyRevokeV1>();
    }

    /// Register a decoder for a tag. A second registration replaces the first.
    pub fn register(&mut self, tx_type: impl Into<String>, decoder: TxDataDecoder) {
        let tx_type = tx_type.into();
        if self.decoders.contains_key(&tx_type) {
            tracing::warn!(tx_type = %tx_type, "replacing registered tx data decoder");
        }
        self.decoders.insert(tx_type, decoder);
    }

    /// Register a statically known kind under its own tag.
    pub fn register_kind<T: TxDataKind>(&mut self) {
        self.register(
            T::tag(),
            Box::new(|raw: &RawValue| -> Result<Arc<dyn TxData>, serde_json::Error> {
                let data: T = serde_json::from_str(raw.get())?;
                Ok(Arc::new(data))
            }),
        );
    }

    pub fn contains(&self, tx_type: &str) -> bool {
        self.decoders.contains_key(tx_type)
    }

    pub fn policy(&self) -> UnknownTypePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: UnknownTypePolicy) {
        self.policy = policy;
    }

    /// Registered tags, sorted.
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.decoders.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Wrap a payload as `{type, value}`.
    pub fn encode(&self, data: &dyn TxData) -> Result<TxDataWrapper, TxError> {
        Ok(TxDataWrapper {
            tx_type: data.tx_type(),
            value: data.to_raw_value()?,
        })
    }

    /// Rebuild a payload from its tag and raw value.
    pub fn decode(&self, tx_type: &str, value: &RawValue) -> Result<Arc<dyn TxData>, TxError> {
        match self.decoders.get(tx_type) {
            Some(decoder) => Ok(decoder(value)?),
            None => match self.policy {
                UnknownTypePolicy::Passthrough => {
                    tracing::trace!(tx_type, "passing through unregistered tx data type");
                    Ok(Arc::new(UnknownTxData::new(tx_type, value.to_owned())))
                }
                UnknownTypePolicy::Reject => Err(TxError::UnknownType {
                    tx_type: tx_type.to_string(),
                }),
            },
        }
    }

    /// Rebuild a payload from its wire wrapper.
    pub fn decode_wrapper(&self, wrapper: &TxDataWrapper) -> Result<Arc<dyn TxData>, TxError> {
        self.decode(&wrapper.tx_type, &wrapper.value)
    }
}

impl Default for TxDataRegistry {
    fn default() -> Self {
        Self::with_default_types()
    }
}

impl std::fmt::Debug for TxDataRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxDataRegistry")
            .field("tags", &self.tags())
            .field("policy", &self.policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "2075c941-6876-405b-87d5-13791c0dc53a";

    fn raw(s: &str) -> Box<RawValue> {
        RawValue::from_string(s.to_string()).unwrap()
    }

    #[test]
    fn default_registry_has_six_kinds() {
        let registry = TxDataRegistry::with_default_types();
        assert_eq!(
            registry.tags(),
            vec![
                "account.key.create.v1",
                "account.key.revoke.v1",
                "account.key.rotate.v1",
                "certify.certificate.ed25519.v1",
                "certify.certificate.raw.v1",
                "certify.secret.nacl_box.v1",
            ]
        );
        assert_eq!(registry.policy(), UnknownTypePolicy::Passthrough);
    }

    #[test]
    fn decode_registered_kind() {
        let registry = TxDataRegistry::with_default_types();
        let data = registry
            .decode(
                "certify.certificate.raw.v1",
                &raw(&format!(r#"{{"id":"{ID}","value":"AQID"}}"#)),
            )
            .unwrap();
        let cert = data.as_any().downcast_ref::<CertificateRawV1>().unwrap();
        assert_eq!(cert.value, vec![1, 2, 3]);
    }

    #[test]
    fn decode_schema_mismatch_is_decoding_error() {
        let registry = TxDataRegistry::with_default_types();
        let err = registry
            .decode("certify.certificate.raw.v1", &raw(r#"{"id":5}"#))
            .unwrap_err();
        assert!(matches!(err, TxError::Decoding(_)));
    }

    #[test]
    fn decode_extra_field_is_decoding_error() {
        let registry = TxDataRegistry::with_default_types();
        let key = "11".repeat(32);
        let cases = [
            (
                "certify.certificate.raw.v1",
                format!(r#"{{"id":"{ID}","value":"AQID","note":"x"}}"#),
            ),
            (
                "account.key.revoke.v1",
                format!(r#"{{"id":"{ID}","public_key":"{key}","reason":"lost"}}"#),
            ),
            (
                "account.key.rotate.v1",
                format!(r#"{{"id":"{ID}","public_key":"{key}","role":"default"}}"#),
            ),
        ];
        for (tag, value) in cases {
            assert!(
                matches!(registry.decode(tag, &raw(&value)), Err(TxError::Decoding(_))),
                "{tag} accepted {value}"
            );
        }
    }

    #[test]
    fn unknown_tag_passthrough_keeps_bytes() {
        let registry = TxDataRegistry::with_default_types();
        let data = registry
            .decode("future.thing.kind.v2", &raw(r#"{"z":1,  "a":"x"}"#))
            .unwrap();
        let unknown = data.as_any().downcast_ref::<UnknownTxData>().unwrap();
        assert_eq!(unknown.raw_json(), r#"{"z":1,  "a":"x"}"#);

        let wrapper = registry.encode(data.as_ref()).unwrap();
        assert_eq!(wrapper.tx_type, "future.thing.kind.v2");
        assert_eq!(wrapper.value.get(), r#"{"z":1,  "a":"x"}"#);
    }

    #[test]
    fn unknown_tag_rejected_under_reject_policy() {
        let registry = TxDataRegistry::new(UnknownTypePolicy::Reject);
        let err = registry
            .decode("certify.certificate.raw.v1", &raw("{}"))
            .unwrap_err();
        assert!(matches!(err, TxError::UnknownType { tx_type } if tx_type == "certify.certificate.raw.v1"));
    }

    #[test]
    fn register_custom_decoder_and_replace() {
        let mut registry = TxDataRegistry::new(UnknownTypePolicy::Reject);
        registry.register(
            "custom.note.text.v1",
            Box::new(|raw: &RawValue| -> Result<Arc<dyn TxData>, serde_json::Error> {
                Ok(Arc::new(UnknownTxData::new("custom.note.text.v1", raw.to_owned())))
            }),
        );
        assert!(registry.contains("custom.note.text.v1"));
        assert!(registry.decode("custom.note.text.v1", &raw("{}")).is_ok());

        registry.register(
            "custom.note.text.v1",
            Box::new(|raw: &RawValue| -> Result<Arc<dyn TxData>, serde_json::Error> {
                let n: u8 = serde_json::from_str(raw.get())?;
                Ok(Arc::new(UnknownTxData::new(n.to_string(), raw.to_owned())))
            }),
        );
        assert!(matches!(
            registry.decode("custom.note.text.v1", &raw("{}")),
            Err(TxError::Decoding(_))
        ));
        assert_eq!(registry.tags().len(), 1);
    }

    #[test]
    fn encode_wraps_with_tag() {
        let registry = TxDataRegistry::default();
        let cert = CertificateRawV1::new(ID, vec![1, 2, 3]).unwrap();
        let wrapper = registry.encode(&cert).unwrap();
        assert_eq!(
            serde_json::to_string(&wrapper).unwrap(),
            format!(r#"{{"type":"certify.certificate.raw.v1","value":{{"id":"{ID}","value":"AQID"}}}}"#)
        );
    }
}
