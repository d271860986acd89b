//! # katena-entity: Ledger Entities
//!
//! Payload variants, the registry that decodes them by type tag, and the
//! signed envelope that carries them.
//!
//! - [`tx_data`]: the [`TxData`] interface, [`TxDataKind`], [`UnknownTxData`].
//! - [`registry`]: [`TxDataRegistry`] and the [`UnknownTypePolicy`].
//! - [`certify`], [`account`]: the v1 payload kinds and [`KeyV1`] state.
//! - [`tx`]: [`Tx`] sign / verify / encode / decode and the canonical
//!   signing payload.
//! - [`api`]: bodies exchanged with the ledger HTTP API.
//!
//! ## Write path
//!
//! ```ignore
//! let cert = CertificateRawV1::new(new_local_id(), b"document".to_vec())?;
//! let tx = Tx::sign(chain_id, NonceTime::now(), Arc::new(cert), &signer)?;
//! let body = tx.encode()?;
//! ```
//!
//! ## Read path
//!
//! ```ignore
//! let registry = TxDataRegistry::with_default_types();
//! let tx = Tx::decode(&body, &registry)?;
//! if let Some(cert) = tx.data_as::<CertificateRawV1>() { /* ... */ }
//! ```

pub mod account;
pub mod api;
pub mod certify;
pub mod error;
pub mod registry;
pub mod tx;
pub mod tx_data;

pub use account::{KeyCreateV1, KeyRevokeV1, KeyRotateV1, KeyV1};
pub use api::{Page, PublicError, RawTxResult, SendTxResult, TxResult, TxStatus};
pub use certify::{CertificateEd25519V1, CertificateRawV1, SecretNaclBoxV1};
pub use error::TxError;
pub use registry::{TxDataRegistry, TxDataWrapper, UnknownTypePolicy};
pub use tx::{tx_data_state_bytes, tx_hash, Tx};
pub use tx_data::{type_tag, TxData, TxDataKind, UnknownTxData};
