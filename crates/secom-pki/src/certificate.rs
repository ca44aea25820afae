//! # Certificate Bundles — Owned DER with PEM Edges
//!
//! `CertificateBundle` owns a single certificate's DER bytes and parses on
//! demand. Owning DER (rather than a parsed borrow) lets bundles live in a
//! process-scoped `TrustContext` and cross thread boundaries freely; parsing
//! is cheap relative to the signature checks that follow it.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use x509_parser::certificate::X509Certificate;
use x509_parser::pem::Pem;
use x509_parser::prelude::FromDer;

use secom_core::{CertificateRejection, SecomError};

const PEM_LABEL: &str = "CERTIFICATE";

/// A single X.509 certificate, stored as owned DER.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateBundle {
    der: Vec<u8>,
}

impl CertificateBundle {
    /// Wrap DER bytes, verifying they parse as a certificate.
    pub fn from_der(der: Vec<u8>) -> Result<Self, SecomError> {
        let bundle = Self { der };
        bundle.parse()?;
        Ok(bundle)
    }

    /// Load the first certificate from a PEM string.
    pub fn from_pem(pem: &str) -> Result<Self, SecomError> {
        Self::chain_from_pem(pem)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                SecomError::certificate(
                    CertificateRejection::Malformed,
                    "no CERTIFICATE block in PEM input",
                )
            })
    }

    /// Load every certificate from a PEM string, in order of appearance.
    pub fn chain_from_pem(pem: &str) -> Result<Vec<Self>, SecomError> {
        let mut bundles = Vec::new();
        for block in Pem::iter_from_buffer(pem.as_bytes()) {
            let block = block.map_err(|e| {
                SecomError::certificate(
                    CertificateRejection::Malformed,
                    format!("invalid PEM block: {e}"),
                )
            })?;
            if block.label != PEM_LABEL {
                continue;
            }
            bundles.push(Self::from_der(block.contents)?);
        }
        Ok(bundles)
    }

    /// The raw DER bytes.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Parse the certificate structure.
    pub fn parse(&self) -> Result<X509Certificate<'_>, SecomError> {
        let (_, cert) = X509Certificate::from_der(&self.der).map_err(|e| {
            SecomError::certificate(
                CertificateRejection::Malformed,
                format!("certificate does not parse as DER: {e}"),
            )
        })?;
        Ok(cert)
    }

    /// Lowercase hex SHA-256 thumbprint over the DER bytes.
    pub fn thumbprint(&self) -> String {
        hex::encode(Sha256::digest(&self.der))
    }

    /// Render as a PEM string with 64-column Base64 body.
    pub fn to_pem(&self) -> String {
        let encoded = BASE64.encode(&self.der);
        let mut out = String::with_capacity(encoded.len() + 64);
        out.push_str("-----BEGIN CERTIFICATE-----\n");
        for chunk in encoded.as_bytes().chunks(64) {
            // Base64 output is always ASCII.
            out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
            out.push('\n');
        }
        out.push_str("-----END CERTIFICATE-----\n");
        out
    }
}
