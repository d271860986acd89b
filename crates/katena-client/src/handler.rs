//! Typed access to the Katena ledger HTTP API.
//!
//! ## Routes (relative to the configured API URL)
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | POST | `/txs` | `SendTxResult` |
//! | GET  | `/txs/{hash}` | `TxResult` |
//! | GET  | `/certificates/{fqid}/txs?page&per_page` | `Page<TxResult>` |
//! | GET  | `/certificates/{fqid}` | `{type, value}` |
//! | GET  | `/secrets/{fqid}/txs?page&per_page` | `Page<TxResult>` |
//! | GET  | `/secrets/{fqid}` | `{type, value}` |
//! | GET  | `/keys/{fqid}/txs?page&per_page` | `Page<TxResult>` |
//! | GET  | `/keys/{fqid}` | `KeyV1` |
//! | GET  | `/companies/{bcid}/keys?page&per_page` | `Page<KeyV1>` |
//!
//! Every request is sent once. Transport failures surface as
//! [`ClientError::Network`].

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use katena_entity::{
    KeyV1, Page, RawTxResult, SendTxResult, Tx, TxData, TxDataRegistry, TxDataWrapper, TxResult,
};

use crate::config::KatenaConfig;
use crate::error::ClientError;
use crate::response::classify;

pub const TXS_PATH: &str = "/txs";
pub const CERTIFICATES_PATH: &str = "/certificates";
pub const SECRETS_PATH: &str = "/secrets";
pub const KEYS_PATH: &str = "/keys";
pub const COMPANIES_PATH: &str = "/companies";

/// Low-level client: one method per route.
#[derive(Debug, Clone)]
pub struct ApiHandler {
    http: reqwest::Client,
    base_url: Url,
    registry: Arc<TxDataRegistry>,
}

impl ApiHandler {
    pub fn new(http: reqwest::Client, base_url: Url, registry: Arc<TxDataRegistry>) -> Self {
        Self {
            http,
            base_url,
            registry,
        }
    }

    /// Build a handler with its own HTTP client from configuration.
    pub fn from_config(
        config: &KatenaConfig,
        registry: Arc<TxDataRegistry>,
    ) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Network {
                endpoint: "client_init".into(),
                source: e,
            })?;
        Ok(Self::new(http, config.api_url.clone(), registry))
    }

    pub fn registry(&self) -> &TxDataRegistry {
        &self.registry
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        path: &str,
        pagination: Option<(u32, u32)>,
    ) -> Result<T, ClientError> {
        let mut request = self.http.get(self.url(path));
        match pagination {
            Some((page, per_page)) => {
                tracing::debug!(endpoint, page, per_page, "sending Katena API request");
                request = request.query(&[("page", page), ("per_page", per_page)]);
            }
            None => tracing::debug!(endpoint, "sending Katena API request"),
        }
        let resp = request.send().await.map_err(|e| ClientError::Network {
            endpoint: endpoint.to_string(),
            source: e,
        })?;
        read_response(endpoint, resp).await
    }

    /// Submit an encoded transaction.
    ///
    /// Calls `POST {api_url}/txs`.
    pub async fn send_tx(&self, tx: &Tx) -> Result<SendTxResult, ClientError> {
        let endpoint = "POST /txs";
        let body = tx.encode()?;
        tracing::debug!(endpoint, bytes = body.len(), "sending Katena API request");
        let resp = self
            .http
            .post(self.url(TXS_PATH))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ClientError::Network {
                endpoint: endpoint.into(),
                source: e,
            })?;
        read_response(endpoint, resp).await
    }

    /// Fetch one transaction by hash.
    ///
    /// Calls `GET {api_url}/txs/{hash}`.
    pub async fn retrieve_tx(&self, hash: &str) -> Result<TxResult, ClientError> {
        let endpoint = format!("GET {TXS_PATH}/{hash}");
        let raw: RawTxResult = self
            .get(&endpoint, &format!("{TXS_PATH}/{hash}"), None)
            .await?;
        Ok(raw.decode(&self.registry)?)
    }

    /// Fetch one page of an entity's transaction history.
    ///
    /// Calls `GET {api_url}{resource}/{fqid}/txs?page&per_page`, where
    /// `resource` is one of [`CERTIFICATES_PATH`], [`SECRETS_PATH`] or
    /// [`KEYS_PATH`].
    pub async fn retrieve_txs(
        &self,
        resource: &str,
        fqid: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<TxResult>, ClientError> {
        let path = format!("{resource}/{fqid}{TXS_PATH}");
        let endpoint = format!("GET {path}");
        let raw: Page<RawTxResult> = self.get(&endpoint, &path, Some((page, per_page))).await?;
        Ok(raw.try_map(|r| r.decode(&self.registry))?)
    }

    /// Fetch the current payload state of a certificate or secret.
    ///
    /// Calls `GET {api_url}{resource}/{fqid}`.
    pub async fn retrieve_state(
        &self,
        resource: &str,
        fqid: &str,
    ) -> Result<Arc<dyn TxData>, ClientError> {
        let path = format!("{resource}/{fqid}");
        let endpoint = format!("GET {path}");
        let wrapper: TxDataWrapper = self.get(&endpoint, &path, None).await?;
        Ok(self.registry.decode_wrapper(&wrapper)?)
    }

    /// Fetch the current state of a key.
    ///
    /// Calls `GET {api_url}/keys/{fqid}`.
    pub async fn retrieve_key(&self, fqid: &str) -> Result<KeyV1, ClientError> {
        let path = format!("{KEYS_PATH}/{fqid}");
        let endpoint = format!("GET {path}");
        self.get(&endpoint, &path, None).await
    }

    /// Fetch one page of a company's keys.
    ///
    /// Calls `GET {api_url}/companies/{bcid}/keys?page&per_page`.
    pub async fn retrieve_company_keys(
        &self,
        company_bcid: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Page<KeyV1>, ClientError> {
        let path = format!("{COMPANIES_PATH}/{company_bcid}{KEYS_PATH}");
        let endpoint = format!("GET {path}");
        self.get(&endpoint, &path, Some((page, per_page))).await
    }
}

async fn read_response<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status().as_u16();
    let body = resp.bytes().await.map_err(|e| ClientError::Network {
        endpoint: endpoint.to_string(),
        source: e,
    })?;
    classify(endpoint, status, &body)
}
