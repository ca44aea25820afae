//! # Revocation Checking — Three-Valued Status
//!
//! Revocation is a pluggable capability: the host injects a
//! `RevocationChecker` into the chain validator. The status is deliberately
//! three-valued — `Unknown` (no reachable revocation data) is distinct from
//! `Good`, and the soft-fail decision over `Unknown` belongs to the
//! validator, not the checker.

use x509_parser::prelude::FromDer;
use x509_parser::revocation_list::CertificateRevocationList;

use crate::certificate::CertificateBundle;

/// Outcome of a revocation lookup for one certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevocationStatus {
    /// Positive evidence the certificate is not revoked.
    Good,
    /// Confirmed revocation.
    Revoked {
        /// Reason string from the revocation entry, when present.
        reason: Option<String>,
    },
    /// Revocation status could not be determined.
    Unknown {
        /// Why the status is indeterminate (for diagnostics).
        cause: String,
    },
}

/// Capability interface for revocation lookups.
///
/// Implementations may block (network CRL/OCSP fetches); callers budget for
/// that latency at the pipeline level.
pub trait RevocationChecker: Send + Sync {
    /// Determine the revocation status of `leaf`.
    fn status(&self, leaf: &CertificateBundle) -> RevocationStatus;
}

/// Checker used when no revocation infrastructure is configured.
///
/// Always reports `Unknown`, which the validator's soft-fail policy accepts
/// with a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRevocationData;

impl RevocationChecker for NoRevocationData {
    fn status(&self, _leaf: &CertificateBundle) -> RevocationStatus {
        RevocationStatus::Unknown {
            cause: "no revocation data source configured".into(),
        }
    }
}

/// CRL-backed checker over a preloaded set of DER revocation lists.
///
/// A certificate is `Revoked` when a CRL from its issuer lists its serial,
/// `Good` when an issuer-matching CRL exists without the serial, and
/// `Unknown` when no CRL matches the issuer or none of the lists parse.
#[derive(Debug, Clone, Default)]
pub struct CrlRevocationChecker {
    crls: Vec<Vec<u8>>,
}

impl CrlRevocationChecker {
    /// Build a checker over DER-encoded CRLs.
    pub fn from_der(crls: Vec<Vec<u8>>) -> Self {
        Self { crls }
    }
}

impl RevocationChecker for CrlRevocationChecker {
    fn status(&self, leaf: &CertificateBundle) -> RevocationStatus {
        let cert = match leaf.parse() {
            Ok(cert) => cert,
            Err(e) => {
                return RevocationStatus::Unknown {
                    cause: format!("leaf does not parse: {e}"),
                }
            }
        };

        let mut issuer_crl_seen = false;
        for der in &self.crls {
            let crl = match CertificateRevocationList::from_der(der) {
                Ok((_, crl)) => crl,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unparseable CRL");
                    continue;
                }
            };
            if crl.issuer().as_raw() != cert.issuer().as_raw() {
                continue;
            }
            issuer_crl_seen = true;
            for revoked in crl.iter_revoked_certificates() {
                if revoked.raw_serial() == cert.raw_serial() {
                    return RevocationStatus::Revoked {
                        reason: revoked.reason_code().map(|(_, r)| r.to_string()),
                    };
                }
            }
        }

        if issuer_crl_seen {
            RevocationStatus::Good
        } else {
            RevocationStatus::Unknown {
                cause: "no CRL available for the certificate issuer".into(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_revocation_data_is_unknown() {
        let key = rcgen::KeyPair::generate().unwrap();
        let params = rcgen::CertificateParams::default();
        let cert = params.self_signed(&key).unwrap();
        let bundle = CertificateBundle::from_der(cert.der().to_vec()).unwrap();
        match NoRevocationData.status(&bundle) {
            RevocationStatus::Unknown { .. } => {}
            other => panic!("expected Unknown, got: {other:?}"),
        }
    }

    #[test]
    fn test_empty_crl_set_is_unknown() {
        let key = rcgen::KeyPair::generate().unwrap();
        let params = rcgen::CertificateParams::default();
        let cert = params.self_signed(&key).unwrap();
        let bundle = CertificateBundle::from_der(cert.der().to_vec()).unwrap();
        let checker = CrlRevocationChecker::default();
        match checker.status(&bundle) {
            RevocationStatus::Unknown { .. } => {}
            other => panic!("expected Unknown, got: {other:?}"),
        }
    }
}
