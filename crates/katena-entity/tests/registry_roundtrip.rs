//! Envelope round trips through the registry for every registered kind, the
//! unknown-type policies, and canonical determinism.

use std::sync::Arc;

use katena_core::identity::new_local_id;
use katena_core::{Fqid, NonceTime};
use katena_crypto::{
    BoxNonce, Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature, Ed25519TxSigner, TxSigner,
    X25519PublicKey,
};
use katena_entity::account::{COMPANY_ADMIN_ROLE_ID, DEFAULT_ROLE_ID};
use katena_entity::{
    tx_data_state_bytes, CertificateEd25519V1, CertificateRawV1, KeyCreateV1, KeyRevokeV1,
    KeyRotateV1, SecretNaclBoxV1, Tx, TxData, TxDataRegistry, TxError, UnknownTxData,
    UnknownTypePolicy,
};
use proptest::prelude::*;
use serde_json::value::RawValue;

const CHAIN_ID: &str = "katena-chain-test";

fn signer() -> Ed25519TxSigner {
    Ed25519TxSigner::new(
        Fqid::new("abcdef", &new_local_id()).unwrap(),
        Ed25519KeyPair::generate(),
    )
}

fn roundtrip<T: TxData + PartialEq>(data: T) {
    let signer = signer();
    let registry = TxDataRegistry::with_default_types();
    let expected_type = data.tx_type();
    let tx = Tx::sign(CHAIN_ID, NonceTime::now(), Arc::new(data), &signer).unwrap();

    let encoded = tx.encode().unwrap();
    let decoded = Tx::decode(&encoded, &registry).unwrap();

    assert_eq!(decoded.data().tx_type(), expected_type);
    assert_eq!(decoded.data_as::<T>(), tx.data_as::<T>());
    assert!(decoded.data_as::<T>().is_some());
    assert_eq!(decoded.encode().unwrap(), encoded);
    decoded.verify(CHAIN_ID, &signer.public_key()).unwrap();
}

#[test]
fn every_registered_kind_roundtrips() {
    let key = Ed25519KeyPair::generate().public_key();

    roundtrip(CertificateRawV1::new(new_local_id(), vec![7u8; 128]).unwrap());
    roundtrip(
        CertificateEd25519V1::new(
            new_local_id(),
            key,
            Ed25519Signature::from_bytes([0x5a; 64]),
        )
        .unwrap(),
    );
    roundtrip(
        SecretNaclBoxV1::new(
            new_local_id(),
            X25519PublicKey::from_bytes([1; 32]),
            BoxNonce::from_bytes([2; 24]),
            b"sealed".to_vec(),
        )
        .unwrap(),
    );
    roundtrip(KeyCreateV1::new(new_local_id(), key, COMPANY_ADMIN_ROLE_ID).unwrap());
    roundtrip(KeyRotateV1::new(new_local_id(), key).unwrap());
    roundtrip(KeyRevokeV1::new(new_local_id(), key).unwrap());
}

fn unknown_envelope(value: &str) -> String {
    format!(
        r#"{{"nonce_time":"2020-01-01T00:00:00.000000Z","data":{{"type":"vote.ballot.cast.v7","value":{value}}},"signer_fqid":"abcdef-{}","signature":"{}"}}"#,
        new_local_id(),
        "00".repeat(64)
    )
}

#[test]
fn unknown_type_passthrough_reencodes_byte_exact() {
    let registry = TxDataRegistry::with_default_types();
    let original = unknown_envelope(r#"{ "zeta": [1, 2],"alpha":{"b":true,"a":null} }"#);
    let tx = Tx::decode(original.as_bytes(), &registry).unwrap();

    let unknown = tx.data_as::<UnknownTxData>().unwrap();
    assert_eq!(unknown.raw_json(), r#"{ "zeta": [1, 2],"alpha":{"b":true,"a":null} }"#);
    assert_eq!(tx.encode().unwrap(), original.as_bytes());
}

#[test]
fn unknown_type_rejected_when_policy_says_so() {
    let registry = {
        let mut r = TxDataRegistry::with_default_types();
        r.set_policy(UnknownTypePolicy::Reject);
        r
    };
    let err = Tx::decode(unknown_envelope("{}").as_bytes(), &registry).unwrap_err();
    assert!(matches!(err, TxError::UnknownType { tx_type } if tx_type == "vote.ballot.cast.v7"));
}

#[test]
fn key_create_with_default_role() {
    let key = KeyCreateV1::new(new_local_id(), Ed25519PublicKey::from_bytes([3; 32]), DEFAULT_ROLE_ID)
        .unwrap();
    assert_eq!(key.role, "default");
}

fn object_text(pairs: &[(String, u32)]) -> String {
    let body: Vec<String> = pairs.iter().map(|(k, v)| format!("\"{k}\":{v}")).collect();
    format!("{{{}}}", body.join(","))
}

proptest! {
    /// Canonical bytes do not depend on the order keys arrived in.
    #[test]
    fn canonical_bytes_ignore_key_order(
        entries in proptest::collection::btree_map("[a-z_]{1,10}", 0u32..1000, 1..8)
    ) {
        let forward: Vec<(String, u32)> = entries.clone().into_iter().collect();
        let mut backward = forward.clone();
        backward.reverse();

        let nonce_time = NonceTime::parse("2021-06-01T12:00:00.123456Z").unwrap();
        let a = UnknownTxData::new(
            "vote.ballot.cast.v7",
            RawValue::from_string(object_text(&forward)).unwrap(),
        );
        let b = UnknownTxData::new(
            "vote.ballot.cast.v7",
            RawValue::from_string(object_text(&backward)).unwrap(),
        );
        prop_assert_eq!(
            tx_data_state_bytes(CHAIN_ID, &nonce_time, &a).unwrap(),
            tx_data_state_bytes(CHAIN_ID, &nonce_time, &b).unwrap()
        );
    }
}
