//! # katena-client: Async client for the Katena ledger API
//!
//! - [`transactor::Transactor`]: sign-and-send helpers for each payload kind,
//!   history, latest-transaction and state lookups.
//! - [`handler::ApiHandler`]: one method per HTTP route.
//! - [`pagination`]: last-page arithmetic and latest-item resolution.
//! - [`response::classify`]: success body vs. `PublicError` by status.
//! - [`config::KatenaConfig`]: environment-driven configuration.
//!
//! ## Behaviour
//!
//! Requests are sent one at a time and never retried. The crate emits
//! `tracing` events and does not install a subscriber.
//!
//! ```ignore
//! let config = KatenaConfig::from_env()?;
//! let signer = Ed25519TxSigner::from_base64(&key_fqid, &private_key_b64)?;
//! let transactor = Transactor::from_config(&config, Some(Arc::new(signer)))?;
//! let sent = transactor
//!     .send_certificate_raw_v1(&new_local_id(), b"document".to_vec())
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod pagination;
pub mod response;
pub mod transactor;

pub use config::{ConfigError, KatenaConfig};
pub use error::ClientError;
pub use handler::ApiHandler;
pub use pagination::{last_page, resolve_latest, resolve_latest_async};
pub use response::classify;
pub use transactor::Transactor;
