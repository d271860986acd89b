//! Katena client error types.

use katena_core::ValidationError;
use katena_entity::{PublicError, TxError};

use crate::config::ConfigError;

/// Errors from Katena API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error. Never retried.
    #[error("HTTP error calling {endpoint}: {source}")]
    Network {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The ledger answered with an error envelope.
    #[error("Katena API {endpoint} returned {status}: {error}")]
    Api {
        endpoint: String,
        status: u16,
        error: PublicError,
    },
    /// The response body did not match the expected shape.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Decoding {
        endpoint: String,
        source: serde_json::Error,
    },
    /// A lookup found nothing.
    #[error("{what} not found")]
    NotFound { what: String },
    /// A request argument was invalid.
    #[error("invalid argument: {0}")]
    Validation(#[from] ValidationError),
    /// Building, signing or decoding a transaction failed.
    #[error("transaction error: {0}")]
    Tx(#[from] TxError),
    /// Sending needs both a signer and a chain id.
    #[error("cannot send transactions without a signer and a chain id")]
    MissingSigner,
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
