//! # Trust Context — Process-Scoped Trust Anchor Set
//!
//! `TrustContext` holds the trusted root certificates (and optional
//! intermediates) loaded once at process start. It is immutable for the
//! lifetime of the process and safe for unsynchronized concurrent reads;
//! certificate rotation requires a restart or an explicit hot-swap outside
//! this layer.

use secom_core::SecomError;

use crate::certificate::CertificateBundle;

/// Immutable set of trust anchors plus optional path-building intermediates.
#[derive(Debug, Clone)]
pub struct TrustContext {
    roots: Vec<CertificateBundle>,
    intermediates: Vec<CertificateBundle>,
}

impl TrustContext {
    /// Build a trust context; at least one root is required.
    pub fn new(
        roots: Vec<CertificateBundle>,
        intermediates: Vec<CertificateBundle>,
    ) -> Result<Self, SecomError> {
        if roots.is_empty() {
            return Err(SecomError::Validation(
                "trust context requires at least one trusted root certificate".into(),
            ));
        }
        Ok(Self {
            roots,
            intermediates,
        })
    }

    /// Load a trust context from PEM strings (concatenated blocks allowed).
    pub fn from_pem(roots_pem: &str, intermediates_pem: Option<&str>) -> Result<Self, SecomError> {
        let roots = CertificateBundle::chain_from_pem(roots_pem)?;
        let intermediates = match intermediates_pem {
            Some(pem) => CertificateBundle::chain_from_pem(pem)?,
            None => Vec::new(),
        };
        Self::new(roots, intermediates)
    }

    /// The trust anchors.
    pub fn roots(&self) -> &[CertificateBundle] {
        &self.roots
    }

    /// The preloaded intermediates.
    pub fn intermediates(&self) -> &[CertificateBundle] {
        &self.intermediates
    }

    /// True if `thumbprint` names one of the trust anchors.
    pub fn contains_root_thumbprint(&self, thumbprint: &str) -> bool {
        self.roots.iter().any(|r| r.thumbprint() == thumbprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn self_signed() -> CertificateBundle {
        let key = rcgen::KeyPair::generate().unwrap();
        let mut params = rcgen::CertificateParams::default();
        params
            .distinguished_name
            .push(rcgen::DnType::CommonName, "Trust Test Root");
        let cert = params.self_signed(&key).unwrap();
        CertificateBundle::from_der(cert.der().to_vec()).unwrap()
    }

    #[test]
    fn test_requires_at_least_one_root() {
        assert!(TrustContext::new(vec![], vec![]).is_err());
        assert!(TrustContext::new(vec![self_signed()], vec![]).is_ok());
    }

    #[test]
    fn test_root_thumbprint_lookup() {
        let root = self_signed();
        let thumb = root.thumbprint();
        let ctx = TrustContext::new(vec![root], vec![]).unwrap();
        assert!(ctx.contains_root_thumbprint(&thumb));
        assert!(!ctx.contains_root_thumbprint(&"00".repeat(32)));
    }

    #[test]
    fn test_from_pem() {
        let root = self_signed();
        let ctx = TrustContext::from_pem(&root.to_pem(), None).unwrap();
        assert_eq!(ctx.roots().len(), 1);
        assert!(ctx.intermediates().is_empty());
    }
}
