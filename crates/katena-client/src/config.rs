//! Katena client configuration.
//!
//! Defaults point to the public test network. Override via environment
//! variables or explicit construction.

use url::Url;

/// Default ledger API base URL.
pub const DEFAULT_API_URL: &str = "https://nodes.test.katena.transchain.io/api/v1";

/// Default chain id.
pub const DEFAULT_CHAIN_ID: &str = "katena-chain-test";

/// Default page size for history lookups.
pub const DEFAULT_TX_PER_PAGE: u32 = 10;

/// Default request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Configuration for talking to a Katena node.
#[derive(Debug, Clone)]
pub struct KatenaConfig {
    /// Base URL of the ledger API, including its version prefix.
    pub api_url: Url,
    /// Chain id mixed into every signed payload.
    pub chain_id: String,
    /// Page size used when resolving the latest transaction.
    pub tx_per_page: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl KatenaConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `KATENA_API_URL` (default: `https://nodes.test.katena.transchain.io/api/v1`)
    /// - `KATENA_CHAIN_ID` (default: `katena-chain-test`)
    /// - `KATENA_TX_PER_PAGE` (default: 10, must be positive)
    /// - `KATENA_TIMEOUT_SECS` (default: 15)
    pub fn from_env() -> Result<Self, ConfigError> {
        let tx_per_page = env_parse("KATENA_TX_PER_PAGE", DEFAULT_TX_PER_PAGE)?;
        if tx_per_page == 0 {
            return Err(ConfigError::InvalidValue(
                "KATENA_TX_PER_PAGE".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            api_url: env_url("KATENA_API_URL", DEFAULT_API_URL)?,
            chain_id: std::env::var("KATENA_CHAIN_ID")
                .unwrap_or_else(|_| DEFAULT_CHAIN_ID.to_string()),
            tx_per_page,
            timeout_secs: env_parse("KATENA_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    pub fn local_mock(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: Url::parse(api_url)
                .map_err(|e| ConfigError::InvalidUrl(api_url.to_string(), e.to_string()))?,
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            tx_per_page: DEFAULT_TX_PER_PAGE,
            timeout_secs: 5,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn env_parse<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidValue(var.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),
}
