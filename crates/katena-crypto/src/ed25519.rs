//! # Ed25519 Keys and Signatures
//!
//! Ed25519 key pairs, public keys and signatures for transaction envelopes
//! and `certify.certificate.ed25519` payloads.
//!
//! ## Invariants
//!
//! - Signing input MUST be `&CanonicalBytes`. Raw bytes cannot be signed.
//! - Private keys are never serialized or logged. `Ed25519KeyPair` does not
//!   implement `Serialize` and its `Debug` prints `<private>`.
//! - Decoded private key material is held in `Zeroizing` buffers.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use katena_core::encoding::{from_base64, to_base64};
use katena_core::{CanonicalBytes, CryptoError};
use zeroize::Zeroizing;

use crate::bytes::fixed_bytes;

pub const PUBLIC_KEY_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;
const SEED_LEN: usize = 32;
const KEYPAIR_LEN: usize = SEED_LEN + PUBLIC_KEY_LEN;

fixed_bytes!(
    /// An Ed25519 public key. Travels as 64 hex characters.
    Ed25519PublicKey,
    PUBLIC_KEY_LEN,
    "public_key"
);

fixed_bytes!(
    /// An Ed25519 signature. Travels as 128 hex characters.
    Ed25519Signature,
    SIGNATURE_LEN,
    "signature"
);

impl Ed25519PublicKey {
    /// Check `signature` over `data` against this key.
    ///
    /// Bytes that are not a valid curve point give `KeyError`; a signature
    /// that does not match gives `VerificationFailed`.
    pub fn verify(
        &self,
        data: &CanonicalBytes,
        signature: &Ed25519Signature,
    ) -> Result<(), CryptoError> {
        let key = VerifyingKey::from_bytes(&self.0)
            .map_err(|e| CryptoError::KeyError(format!("public key {self:?} is not a curve point: {e}")))?;
        key.verify(
            data.as_bytes(),
            &ed25519_dalek::Signature::from_bytes(&signature.0),
        )
        .map_err(|e| CryptoError::VerificationFailed(e.to_string()))
    }
}

/// Free-function form of [`Ed25519PublicKey::verify`].
pub fn verify_with_public_key(
    data: &CanonicalBytes,
    signature: &Ed25519Signature,
    public_key: &Ed25519PublicKey,
) -> Result<(), CryptoError> {
    public_key.verify(data, signature)
}

/// A private signing key with its public half.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
}

impl Ed25519KeyPair {
    /// A fresh key from the operating system's CSPRNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut rand_core::OsRng),
        }
    }

    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Load a private key from standard base64.
    ///
    /// Accepts either the 64-byte `seed || public_key` form (88 characters),
    /// whose public half must match the seed, or a bare 32-byte seed.
    pub fn from_base64(b64: &str) -> Result<Self, CryptoError> {
        let raw = Zeroizing::new(
            from_base64("private_key", b64).map_err(|e| CryptoError::KeyError(e.to_string()))?,
        );
        if let Ok(keypair) = <&[u8; KEYPAIR_LEN]>::try_from(raw.as_slice()) {
            let signing_key = SigningKey::from_keypair_bytes(keypair)
                .map_err(|e| CryptoError::KeyError(format!("invalid key pair: {e}")))?;
            return Ok(Self { signing_key });
        }
        if let Ok(seed) = <&[u8; SEED_LEN]>::try_from(raw.as_slice()) {
            return Ok(Self::from_seed(seed));
        }
        Err(CryptoError::KeyError(format!(
            "private key must be {SEED_LEN} or {KEYPAIR_LEN} bytes, got {}",
            raw.len()
        )))
    }

    /// The 64-byte `seed || public_key` form as standard base64.
    pub fn to_base64(&self) -> Zeroizing<String> {
        let keypair = Zeroizing::new(self.signing_key.to_keypair_bytes());
        Zeroizing::new(to_base64(&keypair[..]))
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    pub fn sign(&self, data: &CanonicalBytes) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(data.as_bytes()).to_bytes())
    }
}

impl std::fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Ed25519KeyPair(<private>)")
    }
}
