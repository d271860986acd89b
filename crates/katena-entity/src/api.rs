//! # API Value Types
//!
//! Bodies exchanged with the ledger HTTP API: transaction statuses, send
//! results, fetched transactions, pages and the public error envelope.

use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use katena_core::HexBytes;

use crate::error::TxError;
use crate::registry::TxDataRegistry;
use crate::tx::Tx;

/// Processing status of a transaction.
///
/// `0` is OK, `1` is pending, anything higher is an application error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatus {
    pub code: u32,
    pub message: String,
}

impl TxStatus {
    pub const OK: u32 = 0;
    pub const PENDING: u32 = 1;

    pub fn is_ok(&self) -> bool {
        self.code == Self::OK
    }

    pub fn is_pending(&self) -> bool {
        self.code == Self::PENDING
    }

    pub fn is_error(&self) -> bool {
        self.code > Self::PENDING
    }
}

/// Response to `POST /txs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendTxResult {
    pub hash: HexBytes,
    pub status: TxStatus,
}

/// A transaction as returned by the ledger, before payload decoding.
#[derive(Debug, Deserialize)]
pub struct RawTxResult {
    pub hash: HexBytes,
    pub height: i64,
    pub index: u32,
    pub status: TxStatus,
    pub tx: Box<RawValue>,
}

impl RawTxResult {
    /// Decode the embedded transaction through `registry`.
    pub fn decode(self, registry: &TxDataRegistry) -> Result<TxResult, TxError> {
        let tx = Tx::decode_str(self.tx.get(), registry)?;
        Ok(TxResult {
            hash: self.hash,
            height: self.height,
            index: self.index,
            status: self.status,
            tx,
        })
    }
}

/// A transaction with its block position and processing status.
#[derive(Debug, Clone)]
pub struct TxResult {
    pub hash: HexBytes,
    pub height: i64,
    pub index: u32,
    pub status: TxStatus,
    pub tx: Tx,
}

/// One page of a paginated listing.
///
/// `total` counts items across all pages. Transaction listings name the item
/// array `txs`; both spellings are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(alias = "txs")]
    pub items: Vec<T>,
    pub total: u32,
}

impl<T> Page<T> {
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn into_last(mut self) -> Option<T> {
        self.items.pop()
    }

    /// Convert every item, stopping at the first failure.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        Ok(Page {
            items: self.items.into_iter().map(f).collect::<Result<_, _>>()?,
            total: self.total,
        })
    }
}

/// Structured error body returned with any non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("code {code}: {message}")]
pub struct PublicError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codespace: Option<String>,
    pub code: u32,
    pub message: String,
}
