//! # Canonical Serialization
//!
//! This module defines `CanonicalBytes`, the sole construction path for bytes
//! that are signed or verified anywhere in the Katena client.
//!
//! ## Invariant
//!
//! `CanonicalBytes` has a private inner field. The only way to construct it is
//! through `CanonicalBytes::new()`, which rejects floats and then emits RFC 8785
//! (JSON Canonicalization Scheme) bytes: object keys sorted at every nesting
//! level, compact separators, no insignificant whitespace.
//!
//! Any function that signs or verifies must accept `&CanonicalBytes`, so a
//! signature can never be computed over a non-canonical encoding.
//!
//! ## Cross-Implementation Compatibility
//!
//! Every payload field in the ledger protocol is a string, a boolean, an
//! integer or a nested object, and every key is ASCII snake_case. For that
//! domain, JCS output is byte-identical to "unmarshal into a generic map,
//! re-marshal with sorted keys", which is how the other SDKs sort their
//! signing payloads.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes a signature is computed over.
///
/// Object keys are sorted at every depth, separators are compact and every
/// number is an integer. Only [`CanonicalBytes::new`] constructs one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// `FloatRejected` names the JSON path of the first non-integer number.
    /// `SerializationFailed` covers values serde cannot express as JSON, such
    /// as maps with non-string keys.
    pub fn new(value: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let tree = serde_json::to_value(value)?;
        reject_floats(&tree, &mut String::from("$"))?;
        Ok(Self(serde_jcs::to_vec(&tree)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Walk `value` depth-first and fail on the first float, reporting where it
/// sits. `path` is restored to its entry value on success.
fn reject_floats(value: &Value, path: &mut String) -> Result<(), CanonicalizationError> {
    match value {
        Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
            Err(CanonicalizationError::FloatRejected {
                path: path.clone(),
                value: n.as_f64().unwrap_or(f64::NAN),
            })
        }
        Value::Object(map) => map.iter().try_for_each(|(key, child)| {
            let len = path.len();
            path.push('.');
            path.push_str(key);
            reject_floats(child, path)?;
            path.truncate(len);
            Ok(())
        }),
        Value::Array(items) => items.iter().enumerate().try_for_each(|(i, child)| {
            let len = path.len();
            path.push_str(&format!("[{i}]"));
            reject_floats(child, path)?;
            path.truncate(len);
            Ok(())
        }),
        _ => Ok(()),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Inserting the same entries in a different order yields the same bytes.
        #[test]
        fn insertion_order_is_irrelevant(
            entries in prop::collection::btree_map("[a-z_]{1,10}", "[a-zA-Z0-9+/=]{0,20}", 1..8)
        ) {
            let forward: serde_json::Map<String, Value> = entries
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            let backward: serde_json::Map<String, Value> = entries
                .iter()
                .rev()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            let nested_a = serde_json::json!({"outer": Value::Object(forward), "n": 1});
            let nested_b = serde_json::json!({"n": 1, "outer": Value::Object(backward)});
            prop_assert_eq!(
                CanonicalBytes::new(&nested_a).unwrap(),
                CanonicalBytes::new(&nested_b).unwrap()
            );
        }

        /// Canonicalizing the parse of canonical output is a fixed point.
        #[test]
        fn canonical_output_is_stable(key in "[a-z_]{1,8}", n in -(1i64 << 53)..(1i64 << 53), s in "\\PC{0,16}") {
            let once = CanonicalBytes::new(&serde_json::json!({ key: n, "s": s })).unwrap();
            let reparsed: Value = serde_json::from_slice(once.as_bytes()).unwrap();
            prop_assert_eq!(CanonicalBytes::new(&reparsed).unwrap(), once);
        }
    }
}
