//! # Temporal Types: Nonce Times
//!
//! Defines `NonceTime`, the envelope timestamp used both for replay
//! protection and as a signing input.
//!
//! ## Invariant
//!
//! A nonce time is always UTC and always truncated to microseconds. It renders
//! in a fixed-width RFC 3339 form with exactly six fractional digits and a `Z`
//! suffix (`2019-10-17T09:46:10.010200Z`). The same instant therefore produces
//! the same bytes in every implementation, even when the fractional part has
//! trailing zeros.
//!
//! Parsing is lenient about offsets (any RFC 3339 offset is converted to UTC)
//! and sub-microsecond digits are dropped. This core does not enforce
//! monotonicity; it only formats deterministically.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// `strftime` pattern of the wire form. `%.6f` always emits six digits.
const NONCE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// A UTC timestamp with microsecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NonceTime(DateTime<Utc>);

impl NonceTime {
    /// The current UTC time, truncated to microseconds.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Wrap a `DateTime<Utc>`, truncating sub-microsecond digits.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_micros(dt))
    }

    /// Parse an RFC 3339 string with any offset, converting to UTC.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| ValidationError::Malformed {
            field: "nonce_time",
            reason: format!("{s:?} is not RFC 3339: {e}"),
        })?;
        Ok(Self::from_utc(dt.with_timezone(&Utc)))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render in the fixed-width wire form.
    pub fn to_rfc3339_micros(&self) -> String {
        self.0.format(NONCE_TIME_FORMAT).to_string()
    }
}

impl From<DateTime<Utc>> for NonceTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_utc(dt)
    }
}

impl std::fmt::Display for NonceTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_rfc3339_micros())
    }
}

impl Serialize for NonceTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339_micros())
    }
}

impl<'de> Deserialize<'de> for NonceTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

fn truncate_to_micros(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.duration_trunc(TimeDelta::microseconds(1)).unwrap_or(dt)
}
