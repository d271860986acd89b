//! Response classification.
//!
//! The ledger answers `200 OK` or `202 Accepted` with the requested body and
//! anything else with a [`PublicError`] envelope. Both shapes are parsed
//! strictly: a body that matches neither is a decoding error, never a
//! silently empty success.

use serde::de::DeserializeOwned;

use katena_entity::PublicError;

use crate::error::ClientError;

/// Statuses whose body is the success shape.
pub const SUCCESS_STATUSES: [u16; 2] = [200, 202];

/// Parse `body` as `T` on success statuses, as a [`PublicError`] otherwise.
pub fn classify<T: DeserializeOwned>(
    endpoint: &str,
    status: u16,
    body: &[u8],
) -> Result<T, ClientError> {
    if SUCCESS_STATUSES.contains(&status) {
        return serde_json::from_slice(body).map_err(|source| ClientError::Decoding {
            endpoint: endpoint.to_string(),
            source,
        });
    }

    let error: PublicError =
        serde_json::from_slice(body).map_err(|source| ClientError::Decoding {
            endpoint: endpoint.to_string(),
            source,
        })?;
    tracing::warn!(
        endpoint,
        status,
        code = error.code,
        message = %error.message,
        "Katena API returned an error"
    );
    Err(ClientError::Api {
        endpoint: endpoint.to_string(),
        status,
        error,
    })
}
