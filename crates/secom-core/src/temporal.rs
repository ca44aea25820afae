//! # Temporal Types — UTC-Only Signature Times
//!
//! Defines `SignatureTime`, a UTC-only timestamp truncated to seconds
//! precision. Signature times participate in the canonical signing payload,
//! where they render as epoch seconds; a local timezone offset or sub-second
//! component would produce different signing bytes for the same instant on
//! sender and receiver, so neither can exist in this type.
//!
//! Non-UTC wire inputs are rejected by the strict parser. A lenient parser
//! exists for ingesting external metadata that is not signed.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SecomError;

/// A UTC-only timestamp with seconds precision.
///
/// # Construction
///
/// - [`SignatureTime::now()`] — current UTC time, truncated.
/// - [`SignatureTime::from_utc()`] — from a `DateTime<Utc>`, truncating.
/// - [`SignatureTime::from_epoch_secs()`] — from Unix epoch seconds.
/// - [`SignatureTime::parse()`] — strict: Z-suffix ISO-8601 only.
/// - [`SignatureTime::parse_lenient()`] — any RFC 3339 offset, converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SignatureTime(DateTime<Utc>);

impl SignatureTime {
    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// From a Unix epoch timestamp in seconds.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, SecomError> {
        let dt = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| SecomError::Validation(format!("invalid Unix timestamp: {secs}")))?;
        Ok(Self(dt))
    }

    /// Parse an ISO-8601 timestamp, rejecting non-UTC inputs.
    ///
    /// Only the `Z` suffix is accepted — explicit offsets are rejected even
    /// when semantically equivalent (`+00:00`), since the signing payload
    /// must be byte-deterministic across implementations.
    pub fn parse(s: &str) -> Result<Self, SecomError> {
        if !s.ends_with('Z') {
            return Err(SecomError::Validation(format!(
                "signature time must use Z suffix (UTC only), got: {s:?}"
            )));
        }
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| SecomError::Validation(format!("invalid RFC 3339 timestamp {s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Parse an RFC 3339 timestamp accepting any offset, converting to UTC.
    ///
    /// For signed fields prefer [`SignatureTime::parse()`].
    pub fn parse_lenient(s: &str) -> Result<Self, SecomError> {
        let dt = DateTime::parse_from_rfc3339(s)
            .map_err(|e| SecomError::Validation(format!("invalid RFC 3339 timestamp {s:?}: {e}")))?;
        Ok(Self(truncate_to_seconds(dt.with_timezone(&Utc))))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Unix epoch seconds — the canonical signing rendering.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// ISO-8601 with Z suffix (e.g. `2026-01-15T12:00:00Z`) — the wire form.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for SignatureTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}
