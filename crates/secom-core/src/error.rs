//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error taxonomy used throughout the envelope stack. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Every pipeline stage fails fast with a typed error; no stage silently
//!   downgrades security (an unverifiable signature is never treated as
//!   "unsigned and accepted").
//! - Certificate rejections carry a classified reason code for diagnostic
//!   logging while the outward contract stays a single pass/fail.
//! - `fault()` classifies each error as client-caused or server-caused so
//!   transport layers can map to the right status family without inspecting
//!   variant internals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether an error is attributable to the remote peer or to this process.
///
/// Transport layers map `Client` to a 4xx-family status and `Server` to a
/// 5xx-family status. Uncategorized internal failures must map to `Server`
/// rather than leaking detail to the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    /// Malformed, untrusted, or unauthorized input from the peer.
    Client,
    /// Internal failure: missing key material, cipher errors, IO.
    Server,
}

/// Classified reason a certificate chain was rejected.
///
/// Diagnostic only — callers branch on pass/fail, logs carry the reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificateRejection {
    /// No certification path from the leaf to any trusted root.
    PathBuilding,
    /// A certificate in the path is past its not-after date.
    Expired,
    /// A certificate in the path is before its not-before date.
    NotYetValid,
    /// The leaf is listed on a revocation list (hard revocation).
    Revoked,
    /// The leaf is missing the required key-usage bits.
    KeyUsage,
    /// The certificate could not be parsed.
    Malformed,
}

impl CertificateRejection {
    /// The reason code string used in logs and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PathBuilding => "PATH_BUILDING",
            Self::Expired => "EXPIRED",
            Self::NotYetValid => "NOT_YET_VALID",
            Self::Revoked => "REVOKED",
            Self::KeyUsage => "KEY_USAGE",
            Self::Malformed => "MALFORMED",
        }
    }
}

impl std::fmt::Display for CertificateRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error type for the envelope stack.
#[derive(Error, Debug)]
pub enum SecomError {
    /// Malformed or unparseable envelope, schema mismatch.
    #[error("validation error: {0}")]
    Validation(String),

    /// Certificate chain validation failed (authentication failure).
    #[error("invalid certificate [{reason}]: {detail}")]
    InvalidCertificate {
        /// Classified rejection reason.
        reason: CertificateRejection,
        /// Human-readable detail for diagnostics.
        detail: String,
    },

    /// Digital signature did not verify (integrity failure).
    #[error("signature verification failed: {0}")]
    SignatureVerification(String),

    /// Producing a signature failed: missing or unusable key material.
    #[error("signing error: {0}")]
    Signing(String),

    /// Encryption failed: missing key material or cipher failure.
    #[error("encryption error: {0}")]
    Encryption(String),

    /// Decryption failed: missing key material, bad padding, cipher failure.
    #[error("decryption error: {0}")]
    Decryption(String),

    /// Compression or decompression failed.
    #[error("compression error: {0}")]
    Compression(String),

    /// An algorithm identifier was not recognized.
    #[error("unsupported algorithm identifier: {0:?}")]
    UnsupportedAlgorithm(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SecomError {
    /// Convenience constructor for a certificate rejection.
    pub fn certificate(reason: CertificateRejection, detail: impl Into<String>) -> Self {
        Self::InvalidCertificate {
            reason,
            detail: detail.into(),
        }
    }

    /// Classify this error for transport status mapping.
    pub fn fault(&self) -> Fault {
        match self {
            Self::Validation(_)
            | Self::InvalidCertificate { .. }
            | Self::SignatureVerification(_)
            | Self::UnsupportedAlgorithm(_)
            | Self::Decryption(_) => Fault::Client,
            Self::Signing(_)
            | Self::Encryption(_)
            | Self::Compression(_)
            | Self::Serialization(_)
            | Self::Io(_) => Fault::Server,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certificate_rejection_codes() {
        assert_eq!(CertificateRejection::PathBuilding.as_str(), "PATH_BUILDING");
        assert_eq!(CertificateRejection::Revoked.to_string(), "REVOKED");
    }

    #[test]
    fn test_certificate_error_display() {
        let err = SecomError::certificate(CertificateRejection::Expired, "leaf not-after 2020");
        let msg = err.to_string();
        assert!(msg.contains("EXPIRED"));
        assert!(msg.contains("leaf not-after 2020"));
    }

    #[test]
    fn test_fault_classification() {
        assert_eq!(
            SecomError::Validation("bad envelope".into()).fault(),
            Fault::Client
        );
        assert_eq!(
            SecomError::certificate(CertificateRejection::PathBuilding, "no path").fault(),
            Fault::Client
        );
        assert_eq!(
            SecomError::SignatureVerification("mismatch".into()).fault(),
            Fault::Client
        );
        assert_eq!(
            SecomError::UnsupportedAlgorithm("zstd".into()).fault(),
            Fault::Client
        );
        assert_eq!(
            SecomError::Encryption("no key material".into()).fault(),
            Fault::Server
        );
        assert_eq!(
            SecomError::Signing("no signing key".into()).fault(),
            Fault::Server
        );
        assert_eq!(
            SecomError::Compression("truncated stream".into()).fault(),
            Fault::Server
        );
    }
}
