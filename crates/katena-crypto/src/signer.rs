//! # Transaction Signer
//!
//! The envelope asks a [`TxSigner`] for a signature over canonical bytes and
//! records the signer's fully-qualified id. Implementations backed by an HSM
//! or a remote key service plug in here; [`Ed25519TxSigner`] keeps the key in
//! process memory.

use katena_core::{CanonicalBytes, CryptoError, Fqid};

use crate::ed25519::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

/// Produces transaction signatures on behalf of a registered key.
pub trait TxSigner: Send + Sync {
    /// Fully-qualified id of the key on the ledger.
    fn signer_fqid(&self) -> &Fqid;

    /// Public half of the signing key.
    fn public_key(&self) -> Ed25519PublicKey;

    /// Sign canonical bytes.
    fn sign(&self, message: &CanonicalBytes) -> Result<Ed25519Signature, CryptoError>;
}

/// A signer holding an Ed25519 key pair in memory.
#[derive(Debug)]
pub struct Ed25519TxSigner {
    fqid: Fqid,
    key_pair: Ed25519KeyPair,
}

impl Ed25519TxSigner {
    pub fn new(fqid: Fqid, key_pair: Ed25519KeyPair) -> Self {
        Self { fqid, key_pair }
    }

    /// Build a signer from a key fqid string and a base64 private key.
    pub fn from_base64(fqid: &str, private_key: &str) -> Result<Self, CryptoError> {
        let fqid = Fqid::parse(fqid).map_err(|e| CryptoError::KeyError(e.to_string()))?;
        let key_pair = Ed25519KeyPair::from_base64(private_key)?;
        Ok(Self::new(fqid, key_pair))
    }

    /// Company the signing key belongs to.
    pub fn company_bcid(&self) -> &str {
        self.fqid.company_bcid()
    }
}

impl TxSigner for Ed25519TxSigner {
    fn signer_fqid(&self) -> &Fqid {
        &self.fqid
    }

    fn public_key(&self) -> Ed25519PublicKey {
        self.key_pair.public_key()
    }

    fn sign(&self, message: &CanonicalBytes) -> Result<Ed25519Signature, CryptoError> {
        Ok(self.key_pair.sign(message))
    }
}
