//! High-level helpers: build, sign and send each payload kind, and look up
//! histories, latest transactions and current state.
//!
//! Ids passed to `send_*` are local ids (UUID v4); the ledger scopes them to
//! the signer's company. Lookups take the company bcid and the local id
//! separately and join them into a fully-qualified id.

use std::sync::Arc;

use katena_core::{concat_fqid, NonceTime, ValidationError};
use katena_crypto::{BoxNonce, Ed25519PublicKey, Ed25519Signature, TxSigner, X25519PublicKey};
use katena_entity::{
    CertificateEd25519V1, CertificateRawV1, KeyCreateV1, KeyRevokeV1, KeyRotateV1, KeyV1, Page,
    SecretNaclBoxV1, SendTxResult, Tx, TxData, TxDataRegistry, TxResult,
};

use crate::config::KatenaConfig;
use crate::error::ClientError;
use crate::handler::{ApiHandler, CERTIFICATES_PATH, KEYS_PATH, SECRETS_PATH};
use crate::pagination::resolve_latest_async;

/// Signs and sends transactions, and reads ledger state.
#[derive(Clone)]
pub struct Transactor {
    handler: ApiHandler,
    chain_id: String,
    signer: Option<Arc<dyn TxSigner>>,
    tx_per_page: u32,
}

impl std::fmt::Debug for Transactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transactor")
            .field("handler", &self.handler)
            .field("chain_id", &self.chain_id)
            .field(
                "signer_fqid",
                &self.signer.as_ref().map(|s| s.signer_fqid().to_string()),
            )
            .field("tx_per_page", &self.tx_per_page)
            .finish()
    }
}

impl Transactor {
    /// `tx_per_page` is the page size used to find the latest transaction and
    /// must be positive.
    pub fn new(
        handler: ApiHandler,
        chain_id: impl Into<String>,
        signer: Option<Arc<dyn TxSigner>>,
        tx_per_page: u32,
    ) -> Result<Self, ClientError> {
        if tx_per_page == 0 {
            return Err(ValidationError::OutOfRange {
                field: "tx_per_page",
                min: 1,
                max: u32::MAX as usize,
                actual: 0,
            }
            .into());
        }
        Ok(Self {
            handler,
            chain_id: chain_id.into(),
            signer,
            tx_per_page,
        })
    }

    /// Build a transactor from configuration with the default registry.
    ///
    /// A transactor without a signer can only read.
    pub fn from_config(
        config: &KatenaConfig,
        signer: Option<Arc<dyn TxSigner>>,
    ) -> Result<Self, ClientError> {
        let handler =
            ApiHandler::from_config(config, Arc::new(TxDataRegistry::with_default_types()))?;
        Self::new(handler, config.chain_id.clone(), signer, config.tx_per_page)
    }

    pub fn handler(&self) -> &ApiHandler {
        &self.handler
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    // -- Write path -----------------------------------------------------------

    /// Certify raw bytes.
    pub async fn send_certificate_raw_v1(
        &self,
        id: &str,
        value: impl Into<Vec<u8>>,
    ) -> Result<SendTxResult, ClientError> {
        self.send_tx(Arc::new(CertificateRawV1::new(id, value)?)).await
    }

    /// Certify an Ed25519 signature over an off-chain document.
    pub async fn send_certificate_ed25519_v1(
        &self,
        id: &str,
        signer: Ed25519PublicKey,
        signature: Ed25519Signature,
    ) -> Result<SendTxResult, ClientError> {
        self.send_tx(Arc::new(CertificateEd25519V1::new(id, signer, signature)?))
            .await
    }

    /// Store content sealed with a NaCl box.
    pub async fn send_secret_nacl_box_v1(
        &self,
        id: &str,
        sender: X25519PublicKey,
        nonce: BoxNonce,
        content: impl Into<Vec<u8>>,
    ) -> Result<SendTxResult, ClientError> {
        self.send_tx(Arc::new(SecretNaclBoxV1::new(id, sender, nonce, content)?))
            .await
    }

    pub async fn send_key_create_v1(
        &self,
        id: &str,
        public_key: Ed25519PublicKey,
        role: &str,
    ) -> Result<SendTxResult, ClientError> {
        self.send_tx(Arc::new(KeyCreateV1::new(id, public_key, role)?))
            .await
    }

    pub async fn send_key_rotate_v1(
        &self,
        id: &str,
        public_key: Ed25519PublicKey,
    ) -> Result<SendTxResult, ClientError> {
        self.send_tx(Arc::new(KeyRotateV1::new(id, public_key)?)).await
    }

    /// Revoke the key entity `id`, whose current public key is `public_key`.
    pub async fn send_key_revoke_v1(
        &self,
        id: &str,
        public_key: Ed25519PublicKey,
    ) -> Result<SendTxResult, ClientError> {
        self.send_tx(Arc::new(KeyRevokeV1::new(id, public_key)?))
            .await
    }

    /// Sign any payload at the current time and send it.
    pub async fn send_tx(&self, data: Arc<dyn TxData>) -> Result<SendTxResult, ClientError> {
        let signer = match self.signer.as_deref() {
            Some(signer) if !self.chain_id.is_empty() => signer,
            _ => return Err(ClientError::MissingSigner),
        };
        let tx = Tx::sign(&self.chain_id, NonceTime::now(), data, signer)?;
        let result = self.handler.send_tx(&tx).await?;
        tracing::info!(
            hash = %result.hash,
            code = result.status.code,
            tx_type = %tx.data().tx_type(),
            "transaction sent"
        );
        Ok(result)
    }

    // -- Read path ------------------------------------------------------------

    /// Fetch a transaction by its hash (hex).
    pub async fn retrieve_tx(&self, hash: &str) -> Result<TxResult, ClientError> {
        self.handler.retrieve_tx(hash).await
    }

    pub async fn retrieve_certificate_txs(
        &self,
        company_bcid: &str,
        id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<TxResult>, ClientError> {
        self.handler
            .retrieve_txs(CERTIFICATES_PATH, &concat_fqid(company_bcid, id), page, per_page)
            .await
    }

    /// Most recent transaction touching a certificate.
    pub async fn retrieve_last_certificate_tx(
        &self,
        company_bcid: &str,
        id: &str,
    ) -> Result<TxResult, ClientError> {
        self.retrieve_last_tx(CERTIFICATES_PATH, "certificate", company_bcid, id)
            .await
    }

    /// Current certificate payload.
    pub async fn retrieve_certificate(
        &self,
        company_bcid: &str,
        id: &str,
    ) -> Result<Arc<dyn TxData>, ClientError> {
        self.handler
            .retrieve_state(CERTIFICATES_PATH, &concat_fqid(company_bcid, id))
            .await
    }

    pub async fn retrieve_secret_txs(
        &self,
        company_bcid: &str,
        id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<TxResult>, ClientError> {
        self.handler
            .retrieve_txs(SECRETS_PATH, &concat_fqid(company_bcid, id), page, per_page)
            .await
    }

    pub async fn retrieve_last_secret_tx(
        &self,
        company_bcid: &str,
        id: &str,
    ) -> Result<TxResult, ClientError> {
        self.retrieve_last_tx(SECRETS_PATH, "secret", company_bcid, id)
            .await
    }

    pub async fn retrieve_secret(
        &self,
        company_bcid: &str,
        id: &str,
    ) -> Result<Arc<dyn TxData>, ClientError> {
        self.handler
            .retrieve_state(SECRETS_PATH, &concat_fqid(company_bcid, id))
            .await
    }

    pub async fn retrieve_key_txs(
        &self,
        company_bcid: &str,
        id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<TxResult>, ClientError> {
        self.handler
            .retrieve_txs(KEYS_PATH, &concat_fqid(company_bcid, id), page, per_page)
            .await
    }

    pub async fn retrieve_last_key_tx(
        &self,
        company_bcid: &str,
        id: &str,
    ) -> Result<TxResult, ClientError> {
        self.retrieve_last_tx(KEYS_PATH, "key", company_bcid, id).await
    }

    /// Current key state.
    pub async fn retrieve_key(&self, company_bcid: &str, id: &str) -> Result<KeyV1, ClientError> {
        self.handler
            .retrieve_key(&concat_fqid(company_bcid, id))
            .await
    }

    pub async fn retrieve_company_keys(
        &self,
        company_bcid: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<KeyV1>, ClientError> {
        self.handler
            .retrieve_company_keys(company_bcid, page, per_page)
            .await
    }

    async fn retrieve_last_tx(
        &self,
        resource: &str,
        noun: &str,
        company_bcid: &str,
        id: &str,
    ) -> Result<TxResult, ClientError> {
        let fqid = concat_fqid(company_bcid, id);
        let what = format!("{noun} {fqid}");
        let fqid = fqid.as_str();
        let handler = &self.handler;
        resolve_latest_async(&what, self.tx_per_page, move |page, per_page| {
            handler.retrieve_txs(resource, fqid, page, per_page)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use katena_core::Fqid;
    use katena_crypto::{Ed25519KeyPair, Ed25519TxSigner};

    fn read_only() -> Transactor {
        let cfg = KatenaConfig::local_mock("http://127.0.0.1:9").unwrap();
        Transactor::from_config(&cfg, None).unwrap()
    }

    #[tokio::test]
    async fn send_without_signer_is_rejected() {
        let err = read_only()
            .send_key_revoke_v1(
                "2075c941-6876-405b-87d5-13791c0dc53a",
                Ed25519KeyPair::generate().public_key(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingSigner));
    }

    #[tokio::test]
    async fn send_without_chain_id_is_rejected() {
        let signer: Arc<dyn TxSigner> = Arc::new(Ed25519TxSigner::new(
            Fqid::parse("abcdef-7a1f2d6b-9b60-4a4e-8a9b-0e5c0a6c1f11").unwrap(),
            Ed25519KeyPair::generate(),
        ));
        let public_key = signer.public_key();
        let transactor =
            Transactor::new(read_only().handler().clone(), "", Some(signer), 10).unwrap();
        let err = transactor
            .send_key_revoke_v1("2075c941-6876-405b-87d5-13791c0dc53a", public_key)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::MissingSigner));
    }

    #[tokio::test]
    async fn invalid_payload_fails_before_any_request() {
        let err = read_only()
            .send_certificate_raw_v1("not-a-uuid", b"x".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn zero_page_size_is_rejected_at_construction() {
        let err = Transactor::new(read_only().handler().clone(), "c", None, 0).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::OutOfRange {
                field: "tx_per_page",
                ..
            })
        ));
    }

    #[test]
    fn debug_shows_signer_id_only() {
        let signer: Arc<dyn TxSigner> = Arc::new(Ed25519TxSigner::new(
            Fqid::parse("abcdef-7a1f2d6b-9b60-4a4e-8a9b-0e5c0a6c1f11").unwrap(),
            Ed25519KeyPair::generate(),
        ));
        let transactor =
            Transactor::new(read_only().handler().clone(), "c", Some(signer), 10).unwrap();
        let dbg = format!("{transactor:?}");
        assert!(dbg.contains("abcdef-7a1f2d6b-9b60-4a4e-8a9b-0e5c0a6c1f11"));
        assert!(!dbg.contains("private"));
    }
}
