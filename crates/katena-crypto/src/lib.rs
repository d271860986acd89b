//! # katena-crypto: Keys and Signatures
//!
//! - [`ed25519`]: key pairs, public keys, signatures, verification.
//! - [`x25519`]: sender public keys and nonces carried by sealed secrets.
//! - [`signer`]: the [`TxSigner`] seam used by the transaction envelope.
//!
//! Signing only accepts [`katena_core::CanonicalBytes`], so a signature is
//! always over the deterministic encoding.

mod bytes;
pub mod ed25519;
pub mod signer;
pub mod x25519;

pub use ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
pub use signer::{Ed25519TxSigner, TxSigner};
pub use x25519::{BoxNonce, X25519PublicKey};
