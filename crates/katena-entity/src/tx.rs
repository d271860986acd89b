//! # Transaction Envelope
//!
//! A [`Tx`] binds a payload to a nonce time, a signer id and an Ed25519
//! signature. The signature covers the canonical bytes built by
//! [`tx_data_state_bytes`] from the chain id, the nonce time and the
//! `{type, value}` wrapper of the payload.
//!
//! ## Wire form
//!
//! ```text
//! {"nonce_time":"…","data":{"type":"…","value":{…}},"signer_fqid":"…","signature":"…"}
//! ```
//!
//! Fields appear in that order. The signature is over a different, sorted
//! payload, so the envelope order does not affect verification.
//!
//! A `Tx` has no setters. Re-signing means building a new `Tx` with a new
//! nonce time.

use std::sync::Arc;

use katena_core::{CanonicalBytes, Fqid, HexBytes, NonceTime, ValidationError};
use katena_crypto::ed25519::verify_with_public_key;
use katena_crypto::{Ed25519PublicKey, Ed25519Signature, TxSigner};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::TxError;
use crate::registry::{TxDataRegistry, TxDataWrapper};
use crate::tx_data::TxData;

/// The signable state: chain id, nonce time and wrapped payload.
#[derive(Serialize)]
struct TxDataState<'a> {
    chain_id: &'a str,
    nonce_time: &'a NonceTime,
    data: TxDataWrapper,
}

/// Canonical bytes a signer signs for a payload on a chain at a nonce time.
///
/// Keys are sorted at every depth, so the result depends only on the three
/// inputs and never on struct field order or map insertion order.
pub fn tx_data_state_bytes(
    chain_id: &str,
    nonce_time: &NonceTime,
    data: &dyn TxData,
) -> Result<CanonicalBytes, TxError> {
    let state = TxDataState {
        chain_id,
        nonce_time,
        data: TxDataWrapper {
            tx_type: data.tx_type(),
            value: data.to_raw_value()?,
        },
    };
    Ok(CanonicalBytes::new(&state)?)
}

/// SHA-256 of an encoded transaction, as the ledger reports it.
pub fn tx_hash(encoded: &[u8]) -> HexBytes {
    HexBytes(Sha256::digest(encoded).to_vec())
}

#[derive(Serialize)]
struct WireTxRef<'a> {
    nonce_time: &'a NonceTime,
    data: TxDataWrapper,
    signer_fqid: &'a Fqid,
    signature: &'a Ed25519Signature,
}

#[derive(Deserialize)]
struct WireTx {
    nonce_time: NonceTime,
    data: TxDataWrapper,
    signer_fqid: Fqid,
    signature: Ed25519Signature,
}

/// A signed transaction.
#[derive(Debug, Clone)]
pub struct Tx {
    nonce_time: NonceTime,
    data: Arc<dyn TxData>,
    signer_fqid: Fqid,
    signature: Ed25519Signature,
}

impl Tx {
    /// Validate `data`, build its canonical state and have `signer` sign it.
    pub fn sign(
        chain_id: &str,
        nonce_time: NonceTime,
        data: Arc<dyn TxData>,
        signer: &dyn TxSigner,
    ) -> Result<Self, TxError> {
        if chain_id.is_empty() {
            return Err(ValidationError::Missing { field: "chain_id" }.into());
        }
        data.validate()?;
        let state = tx_data_state_bytes(chain_id, &nonce_time, data.as_ref())?;
        let signature = signer.sign(&state).map_err(TxError::Signing)?;
        Ok(Self {
            nonce_time,
            data,
            signer_fqid: signer.signer_fqid().clone(),
            signature,
        })
    }

    /// Check the signature against `public_key` for `chain_id`.
    pub fn verify(&self, chain_id: &str, public_key: &Ed25519PublicKey) -> Result<(), TxError> {
        let state = tx_data_state_bytes(chain_id, &self.nonce_time, self.data.as_ref())?;
        verify_with_public_key(&state, &self.signature, public_key).map_err(TxError::Verification)
    }

    /// JSON wire form.
    pub fn encode(&self) -> Result<Vec<u8>, TxError> {
        let wire = WireTxRef {
            nonce_time: &self.nonce_time,
            data: TxDataWrapper {
                tx_type: self.data.tx_type(),
                value: self.data.to_raw_value()?,
            },
            signer_fqid: &self.signer_fqid,
            signature: &self.signature,
        };
        Ok(serde_json::to_vec(&wire)?)
    }

    /// Parse the wire form, rebuilding the payload through `registry`.
    pub fn decode(bytes: &[u8], registry: &TxDataRegistry) -> Result<Self, TxError> {
        let wire: WireTx = serde_json::from_slice(bytes)?;
        Self::from_wire(wire, registry)
    }

    /// Parse the wire form from already-delimited JSON text.
    pub fn decode_str(json: &str, registry: &TxDataRegistry) -> Result<Self, TxError> {
        let wire: WireTx = serde_json::from_str(json)?;
        Self::from_wire(wire, registry)
    }

    fn from_wire(wire: WireTx, registry: &TxDataRegistry) -> Result<Self, TxError> {
        let data = registry.decode_wrapper(&wire.data)?;
        Ok(Self {
            nonce_time: wire.nonce_time,
            data,
            signer_fqid: wire.signer_fqid,
            signature: wire.signature,
        })
    }

    pub fn nonce_time(&self) -> &NonceTime {
        &self.nonce_time
    }

    pub fn data(&self) -> &Arc<dyn TxData> {
        &self.data
    }

    /// The payload as a concrete type, if it is one.
    pub fn data_as<T: TxData>(&self) -> Option<&T> {
        self.data.as_any().downcast_ref::<T>()
    }

    pub fn signer_fqid(&self) -> &Fqid {
        &self.signer_fqid
    }

    pub fn signature(&self) -> &Ed25519Signature {
        &self.signature
    }
}
