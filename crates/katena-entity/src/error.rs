//! # Transaction Errors
//!
//! Everything that can go wrong between building a payload and holding a
//! signed, encoded transaction (or the reverse on the read path).

use katena_core::{CanonicalizationError, CryptoError, ValidationError};
use thiserror::Error;

/// Error building, signing, verifying, encoding or decoding a transaction.
#[derive(Error, Debug)]
pub enum TxError {
    /// A payload or envelope field is invalid. Raised before signing.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The type tag is not registered and the registry rejects unknown tags.
    #[error("unknown tx data type {tx_type:?}")]
    UnknownType {
        /// The unregistered tag.
        tx_type: String,
    },

    /// Malformed JSON or a value that does not match its registered schema.
    #[error("decoding failed: {0}")]
    Decoding(#[from] serde_json::Error),

    /// The signable payload could not be canonicalized.
    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// The signer could not produce a signature.
    #[error("signing failed: {0}")]
    Signing(CryptoError),

    /// The signature does not match the payload and public key.
    #[error("verification failed: {0}")]
    Verification(CryptoError),
}
