//! # Certification Path Validation
//!
//! Builds and validates a certification path from a presented leaf
//! certificate to a trusted root, in four ordered phases:
//!
//! 1. **Path building** — walk issuer/subject links through the
//!    intermediate pool until a trust anchor signs the top of the path.
//!    Every link is signature-checked, the anchor's self-signature
//!    included. The leaf itself joins the intermediate pool, so a chain
//!    presented leaf-first needs no special casing.
//! 2. **Validity windows** — every certificate on the path must contain the
//!    validation instant.
//! 3. **Key usage** — the leaf must assert digitalSignature and
//!    keyEncipherment.
//! 4. **Revocation** — soft fail: confirmed revocation rejects; an
//!    indeterminate status warns and accepts.
//!
//! Failures are classified via `CertificateRejection` for diagnostics; the
//! outward contract is pass/fail plus the reason code.

use x509_parser::certificate::X509Certificate;

use secom_core::{CertificateRejection, SecomError};

use crate::certificate::CertificateBundle;
use crate::revocation::{NoRevocationData, RevocationChecker, RevocationStatus};
use crate::trust::TrustContext;

/// Upper bound on path length, leaf to root. Guards against issuer cycles
/// in a malicious intermediate pool.
const MAX_PATH_LEN: usize = 8;

/// Validates certification paths against a trust anchor set.
pub struct CertificateChainValidator {
    revocation: Box<dyn RevocationChecker>,
}

impl Default for CertificateChainValidator {
    fn default() -> Self {
        Self::new(Box::new(NoRevocationData))
    }
}

impl CertificateChainValidator {
    /// Build a validator with the given revocation checker.
    pub fn new(revocation: Box<dyn RevocationChecker>) -> Self {
        Self { revocation }
    }

    /// Validate `leaf` against a preloaded trust context.
    pub fn validate(&self, leaf: &CertificateBundle, trust: &TrustContext) -> Result<(), SecomError> {
        self.validate_with_sets(leaf, trust.roots(), trust.intermediates())
    }

    /// Validate `leaf` against explicit root and intermediate sets.
    ///
    /// The leaf is automatically included in the intermediate pool for path
    /// construction, matching the preloaded-store entry point's behavior for
    /// self-contained presented chains.
    pub fn validate_with_sets(
        &self,
        leaf: &CertificateBundle,
        roots: &[CertificateBundle],
        intermediates: &[CertificateBundle],
    ) -> Result<(), SecomError> {
        let leaf_cert = leaf.parse()?;

        let mut pool: Vec<X509Certificate<'_>> = Vec::with_capacity(intermediates.len() + 1);
        for bundle in intermediates {
            pool.push(bundle.parse()?);
        }
        pool.push(leaf.parse()?);

        let mut anchors: Vec<X509Certificate<'_>> = Vec::with_capacity(roots.len());
        for bundle in roots {
            anchors.push(bundle.parse()?);
        }

        let path = build_path(&leaf_cert, &pool, &anchors)?;
        check_validity_windows(&path)?;
        check_leaf_key_usage(&leaf_cert)?;
        self.check_revocation(leaf)?;

        Ok(())
    }

    fn check_revocation(&self, leaf: &CertificateBundle) -> Result<(), SecomError> {
        match self.revocation.status(leaf) {
            RevocationStatus::Good => Ok(()),
            RevocationStatus::Revoked { reason } => Err(SecomError::certificate(
                CertificateRejection::Revoked,
                format!(
                    "certificate is revoked ({})",
                    reason.unwrap_or_else(|| "unspecified".into())
                ),
            )),
            RevocationStatus::Unknown { cause } => {
                // Soft fail: indeterminate status accepts with a warning.
                tracing::warn!(
                    cause = %cause,
                    thumbprint = %leaf.thumbprint(),
                    "revocation status indeterminate, accepting per soft-fail policy"
                );
                Ok(())
            }
        }
    }
}

/// Walk issuer links from the leaf until a trust anchor signs the path top.
///
/// Returns the ordered path, leaf first, anchor last.
fn build_path<'a, 'c>(
    leaf: &'a X509Certificate<'c>,
    pool: &'a [X509Certificate<'c>],
    anchors: &'a [X509Certificate<'c>],
) -> Result<Vec<&'a X509Certificate<'c>>, SecomError> {
    let mut path: Vec<&X509Certificate<'_>> = vec![leaf];

    for _ in 0..MAX_PATH_LEN {
        let current = path[path.len() - 1];

        // Anchor reached: the current certificate is issued and signed by a
        // trusted root, and the root's own self-signature holds.
        if let Some(anchor) = anchors.iter().find(|a| {
            a.subject().as_raw() == current.issuer().as_raw()
                && current.verify_signature(Some(a.public_key())).is_ok()
                && a.verify_signature(Some(a.public_key())).is_ok()
        }) {
            path.push(anchor);
            return Ok(path);
        }

        // Otherwise extend through the intermediate pool. Signature
        // verification is part of link selection so a subject-name collision
        // cannot splice an unrelated certificate into the path.
        let next = pool.iter().find(|candidate| {
            candidate.subject().as_raw() == current.issuer().as_raw()
                && candidate.subject().as_raw() != candidate.issuer().as_raw()
                && !path
                    .iter()
                    .any(|p| p.raw_serial() == candidate.raw_serial())
                && current.verify_signature(Some(candidate.public_key())).is_ok()
        });

        match next {
            Some(candidate) => path.push(candidate),
            None => break,
        }
    }

    Err(SecomError::certificate(
        CertificateRejection::PathBuilding,
        format!(
            "no certification path from {} to a trusted root",
            leaf.subject()
        ),
    ))
}

/// Every certificate on the path must contain the validation instant.
fn check_validity_windows(path: &[&X509Certificate<'_>]) -> Result<(), SecomError> {
    let now = secom_core::SignatureTime::now().epoch_secs();
    for cert in path {
        let validity = cert.validity();
        if now < validity.not_before.timestamp() {
            return Err(SecomError::certificate(
                CertificateRejection::NotYetValid,
                format!("certificate {} is not yet valid", cert.subject()),
            ));
        }
        if now > validity.not_after.timestamp() {
            return Err(SecomError::certificate(
                CertificateRejection::Expired,
                format!("certificate {} is expired", cert.subject()),
            ));
        }
    }
    Ok(())
}

/// The leaf must carry a KeyUsage extension asserting digitalSignature and
/// keyEncipherment. A missing extension is a rejection, not a pass.
fn check_leaf_key_usage(leaf: &X509Certificate<'_>) -> Result<(), SecomError> {
    let usage = leaf
        .key_usage()
        .map_err(|e| {
            SecomError::certificate(
                CertificateRejection::Malformed,
                format!("duplicate or malformed KeyUsage extension: {e}"),
            )
        })?
        .ok_or_else(|| {
            SecomError::certificate(
                CertificateRejection::KeyUsage,
                "leaf certificate has no KeyUsage extension",
            )
        })?;

    if !usage.value.digital_signature() || !usage.value.key_encipherment() {
        return Err(SecomError::certificate(
            CertificateRejection::KeyUsage,
            "leaf certificate lacks digitalSignature or keyEncipherment",
        ));
    }
    Ok(())
}
