//! # Exchange Metadata — Per-Message Protection Flags
//!
//! `ExchangeMetadata` travels with every protected message body and records
//! which transformations the sender applied. It is created alongside the
//! message and mutated only by pipeline stages — application code reads it.
//! The flags (not provider presence) gate the inverse transformations on
//! receipt.

use serde::{Deserialize, Serialize};

use secom_core::{CompressionScheme, EncryptionScheme, SignatureScheme};

/// Protection scheme identifier carried by every exchange.
pub const PROTECTION_SCHEME: &str = "SECOM";

/// Flags and algorithm identifiers describing the protections applied to a
/// message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeMetadata {
    /// The protection scheme in force (constant for this protocol profile).
    #[serde(rename = "protectionScheme")]
    pub protection_scheme: String,

    /// The signature algorithm used, when the message is signed.
    #[serde(rename = "digitalSignatureReference", skip_serializing_if = "Option::is_none")]
    pub digital_signature_reference: Option<SignatureScheme>,

    /// True if the body is encrypted.
    #[serde(rename = "dataProtection")]
    pub data_protection: bool,

    /// True if the body is compressed.
    #[serde(rename = "compressionFlag")]
    pub compression_flag: bool,

    /// The compression algorithm applied, when `compression_flag` is set.
    #[serde(rename = "compressionAlgorithm", skip_serializing_if = "Option::is_none")]
    pub compression_algorithm: Option<CompressionScheme>,

    /// The encryption algorithm applied, when `data_protection` is set.
    #[serde(rename = "encryptionAlgorithm", skip_serializing_if = "Option::is_none")]
    pub encryption_algorithm: Option<EncryptionScheme>,
}

impl Default for ExchangeMetadata {
    fn default() -> Self {
        Self {
            protection_scheme: PROTECTION_SCHEME.to_string(),
            digital_signature_reference: None,
            data_protection: false,
            compression_flag: false,
            compression_algorithm: None,
            encryption_algorithm: None,
        }
    }
}

impl ExchangeMetadata {
    /// Fresh metadata with no protections recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no transformation needs inverting on receipt.
    pub fn is_plain(&self) -> bool {
        !self.data_protection && !self.compression_flag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_plain() {
        let meta = ExchangeMetadata::new();
        assert!(meta.is_plain());
        assert_eq!(meta.protection_scheme, "SECOM");
        assert!(meta.digital_signature_reference.is_none());
    }

    #[test]
    fn test_wire_field_names() {
        let meta = ExchangeMetadata {
            digital_signature_reference: Some(SignatureScheme::Ecdsa),
            data_protection: true,
            compression_flag: true,
            compression_algorithm: Some(CompressionScheme::Zip),
            encryption_algorithm: Some(EncryptionScheme::AesCbcPkcs7),
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["protectionScheme"], "SECOM");
        assert_eq!(json["digitalSignatureReference"], "ecdsa");
        assert_eq!(json["dataProtection"], true);
        assert_eq!(json["compressionFlag"], true);
        assert_eq!(json["compressionAlgorithm"], "zip");
        assert_eq!(json["encryptionAlgorithm"], "aes_cbc_pkcs7");
    }

    #[test]
    fn test_absent_algorithms_not_serialized() {
        let json: serde_json::Value = serde_json::to_value(ExchangeMetadata::new()).unwrap();
        assert!(json.get("compressionAlgorithm").is_none());
        assert!(json.get("encryptionAlgorithm").is_none());
        assert!(json.get("digitalSignatureReference").is_none());
    }

    #[test]
    fn test_unknown_algorithm_token_rejected_on_receipt() {
        let raw = r#"{
            "protectionScheme": "SECOM",
            "dataProtection": false,
            "compressionFlag": true,
            "compressionAlgorithm": "zstd"
        }"#;
        let result: Result<ExchangeMetadata, _> = serde_json::from_str(raw);
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let meta = ExchangeMetadata {
            digital_signature_reference: Some(SignatureScheme::Dsa),
            compression_flag: true,
            compression_algorithm: Some(CompressionScheme::Zip),
            ..Default::default()
        };
        let json = serde_json::to_string(&meta).unwrap();
        let parsed: ExchangeMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(meta, parsed);
    }
}
