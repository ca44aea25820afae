//! # Digital Signature Value
//!
//! The signature triple produced by the outbound signer and consumed by the
//! inbound validator: the signer's public certificate chain (leaf to root),
//! the thumbprint of the trusted root it chains to, and the signature bytes
//! in lowercase hex.

use serde::{Deserialize, Serialize};

use secom_core::SecomError;

/// A digital signature with the material needed to verify it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitalSignatureValue {
    /// The signer's certificate chain as PEM strings, ordered leaf to root.
    #[serde(rename = "publicCertificate")]
    pub public_certificate: Vec<String>,

    /// Lowercase hex SHA-256 thumbprint of the root certificate the chain
    /// anchors to.
    #[serde(rename = "publicRootCertificateThumbprint")]
    pub public_root_certificate_thumbprint: String,

    /// The DER signature bytes as a lowercase hex string.
    #[serde(rename = "digitalSignature")]
    pub digital_signature: String,
}

impl DigitalSignatureValue {
    /// The leaf (signing) certificate, first entry of the chain.
    pub fn leaf_certificate(&self) -> Option<&str> {
        self.public_certificate.first().map(String::as_str)
    }

    /// Certificates above the leaf, usable as path-building intermediates.
    pub fn chain_above_leaf(&self) -> &[String] {
        if self.public_certificate.is_empty() {
            &[]
        } else {
            &self.public_certificate[1..]
        }
    }

    /// Decode the hex signature into raw DER bytes.
    pub fn signature_bytes(&self) -> Result<Vec<u8>, SecomError> {
        hex::decode(&self.digital_signature)
            .map_err(|e| SecomError::Validation(format!("signature is not valid hex: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DigitalSignatureValue {
        DigitalSignatureValue {
            public_certificate: vec!["leaf-pem".into(), "root-pem".into()],
            public_root_certificate_thumbprint: "ab".repeat(32),
            digital_signature: "deadbeef".into(),
        }
    }

    #[test]
    fn test_leaf_is_first_entry() {
        assert_eq!(sample().leaf_certificate(), Some("leaf-pem"));
        assert_eq!(sample().chain_above_leaf(), &["root-pem".to_string()]);
    }

    #[test]
    fn test_empty_chain() {
        let dsv = DigitalSignatureValue {
            public_certificate: vec![],
            public_root_certificate_thumbprint: String::new(),
            digital_signature: String::new(),
        };
        assert_eq!(dsv.leaf_certificate(), None);
        assert!(dsv.chain_above_leaf().is_empty());
    }

    #[test]
    fn test_signature_bytes_decodes_hex() {
        assert_eq!(sample().signature_bytes().unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_signature_bytes_rejects_bad_hex() {
        let mut dsv = sample();
        dsv.digital_signature = "not-hex!".into();
        assert!(dsv.signature_bytes().is_err());
    }

    #[test]
    fn test_wire_field_names() {
        let json: serde_json::Value = serde_json::to_value(sample()).unwrap();
        assert!(json.get("publicCertificate").is_some());
        assert!(json.get("publicRootCertificateThumbprint").is_some());
        assert!(json.get("digitalSignature").is_some());
    }
}
