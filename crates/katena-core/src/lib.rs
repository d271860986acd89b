//! # katena-core: Foundational Types for the Katena Client
//!
//! The leaf crate of the workspace. It defines the primitives every other
//! crate agrees on when producing bytes that get signed or sent:
//!
//! 1. **`CanonicalBytes`.** All signing input flows through
//!    `CanonicalBytes::new()`, which sorts object keys at every depth and uses
//!    compact separators. No raw `serde_json::to_vec()` for signing payloads.
//!
//! 2. **`NonceTime`.** UTC, microsecond precision, fixed-width rendering.
//!
//! 3. **`Fqid`.** `{companyBcid}-{localId}` identifiers, split on the first
//!    hyphen only.
//!
//! 4. **Byte encodings.** Upper-case hex for keys/signatures/nonces/hashes,
//!    standard base64 for opaque content.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `katena-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod encoding;
pub mod error;
pub mod identity;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use encoding::HexBytes;
pub use error::{CanonicalizationError, CryptoError, ValidationError};
pub use identity::{concat_fqid, split_fqid, Fqid};
pub use temporal::NonceTime;
