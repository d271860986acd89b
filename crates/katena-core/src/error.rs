//! # Error Types: Leaf Error Hierarchy
//!
//! Errors shared by every Katena crate. All use `thiserror` for derive-based
//! `Display` and `Error` implementations. Higher crates wrap these with
//! `#[from]` instead of re-describing them.

use thiserror::Error;

/// A field failed validation at construction time.
///
/// Validation errors are raised before anything is signed, so a payload that
/// produces one never reaches the wire.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{field} is required")]
    Missing {
        /// Name of the empty field.
        field: &'static str,
    },

    /// A fixed-length field has the wrong length.
    #[error("{field} must be {expected} bytes long, got {actual}")]
    InvalidLength {
        /// Name of the field.
        field: &'static str,
        /// Required length.
        expected: usize,
        /// Length that was provided.
        actual: usize,
    },

    /// A bounded field is outside its allowed length range.
    #[error("{field} must be between {min} and {max} bytes long, got {actual}")]
    OutOfRange {
        /// Name of the field.
        field: &'static str,
        /// Inclusive lower bound.
        min: usize,
        /// Inclusive upper bound.
        max: usize,
        /// Length that was provided.
        actual: usize,
    },

    /// A field is present but malformed (bad UUID, bad encoding, ...).
    #[error("invalid {field}: {reason}")]
    Malformed {
        /// Name of the field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// A value could not be turned into signable bytes.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Signed payloads carry integers only.
    #[error("non-integer number {value} at {path}")]
    FloatRejected { path: String, value: f64 },

    #[error("value is not representable as JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Error in cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key parsing failed.
    #[error("key error: {0}")]
    KeyError(String),

    /// The signer could not produce a signature.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}
