//! # Envelope Variants — Signed Protocol Containers
//!
//! Each envelope variant wraps its domain fields together with the shared
//! envelope signing metadata and defines a fixed signable attribute order
//! through `secom_core::Signable`.
//!
//! ## Protocol Contract
//!
//! The attribute order documented on each `Signable` impl is shared between
//! signer and verifier and MUST NOT change without a protocol version bump.
//! Absent fields keep their position as the empty string — the array length
//! of a variant is constant.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use secom_core::{AttributeArray, Signable, SignatureScheme, SignatureTime};

use crate::signature::DigitalSignatureValue;

/// Acknowledgement type reported back to a producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AckType {
    /// The message reached the consumer.
    Delivered,
    /// The consumer opened (processed) the message.
    Opened,
    /// Processing failed; see the accompanying nack type.
    Error,
}

impl AckType {
    /// Canonical string form used in the signing payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delivered => "DELIVERED",
            Self::Opened => "OPENED",
            Self::Error => "ERROR",
        }
    }
}

/// Negative acknowledgement detail accompanying `AckType::Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NackType {
    /// Failure outside the defined categories.
    UnknownError,
    /// The referenced data could not be found.
    UnknownDataReference,
    /// The envelope signature did not verify.
    SignatureVerificationError,
    /// The payload could not be decrypted.
    DecryptionError,
    /// The payload could not be decompressed.
    DecompressionError,
}

impl NackType {
    /// Canonical string form used in the signing payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownError => "UNKNOWN_ERROR",
            Self::UnknownDataReference => "UNKNOWN_DATA_REFERENCE",
            Self::SignatureVerificationError => "SIGNATURE_VERIFICATION_ERROR",
            Self::DecryptionError => "DECRYPTION_ERROR",
            Self::DecompressionError => "DECOMPRESSION_ERROR",
        }
    }
}

/// Container type of a summarized data product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerType {
    /// No container — raw payload.
    None,
    /// An S-100 dataset.
    S100Dataset,
    /// An S-100 exchange set.
    S100ExchangeSet,
}

impl ContainerType {
    /// Canonical string form used in the signing payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::S100Dataset => "S100_DATASET",
            Self::S100ExchangeSet => "S100_EXCHANGE_SET",
        }
    }
}

/// Envelope signing metadata shared by every variant.
///
/// Populated by the outbound signer; the certificate, thumbprint, and time
/// occupy the trailing positions of each variant's attribute array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeSignatureInfo {
    /// The envelope signer's certificate (PEM, possibly a chain).
    #[serde(rename = "envelopeSignatureCertificate")]
    pub envelope_signature_certificate: Option<String>,

    /// Thumbprint of the trusted root the signer's chain anchors to.
    #[serde(rename = "envelopeRootCertificateThumbprint")]
    pub envelope_root_certificate_thumbprint: Option<String>,

    /// UTC instant the envelope signature was produced, second precision.
    #[serde(rename = "envelopeSignatureTime")]
    pub envelope_signature_time: Option<SignatureTime>,

    /// The signature algorithm used for the envelope signature.
    ///
    /// Not part of the attribute array — carried beside it so the verifier
    /// knows which scheme to apply.
    #[serde(rename = "digitalSignatureReference")]
    pub digital_signature_reference: Option<SignatureScheme>,
}

impl EnvelopeSignatureInfo {
    /// Push the three signature-info positions onto an attribute array.
    ///
    /// Order: certificate, root thumbprint, signature time. Every variant's
    /// array ends with exactly these three positions.
    fn extend(&self, array: AttributeArray) -> AttributeArray {
        array
            .opt_text(self.envelope_signature_certificate.as_deref())
            .opt_text(self.envelope_root_certificate_thumbprint.as_deref())
            .opt_time(self.envelope_signature_time)
    }
}

/// Acknowledgement of a previously delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcknowledgementEnvelope {
    /// When the acknowledged event occurred.
    #[serde(rename = "createdAt")]
    pub created_at: SignatureTime,

    /// The transaction being acknowledged.
    #[serde(rename = "transactionIdentifier")]
    pub transaction_identifier: Uuid,

    /// The acknowledgement type.
    #[serde(rename = "ackType")]
    pub ack_type: AckType,

    /// Failure detail when `ack_type` is `Error`.
    #[serde(rename = "nackType")]
    pub nack_type: Option<NackType>,

    /// Envelope signing metadata.
    #[serde(flatten)]
    pub signature_info: EnvelopeSignatureInfo,
}

impl Signable for AcknowledgementEnvelope {
    /// Fixed order (7 positions): `createdAt`, `transactionIdentifier`,
    /// `ackType`, `nackType`, certificate, thumbprint, signature time.
    fn attribute_array(&self) -> AttributeArray {
        let array = AttributeArray::new()
            .time(self.created_at)
            .uuid(&self.transaction_identifier)
            .text(self.ack_type.as_str())
            .opt_text(self.nack_type.map(|n| n.as_str()));
        self.signature_info.extend(array)
    }
}

/// Notification that a consumer was granted or denied access to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessNotificationEnvelope {
    /// Whether access was granted.
    pub decision: bool,

    /// Optional human-readable reason for the decision.
    #[serde(rename = "decisionReason")]
    pub decision_reason: Option<String>,

    /// The access request transaction.
    #[serde(rename = "transactionIdentifier")]
    pub transaction_identifier: Uuid,

    /// Envelope signing metadata.
    #[serde(flatten)]
    pub signature_info: EnvelopeSignatureInfo,
}

impl Signable for AccessNotificationEnvelope {
    /// Fixed order (6 positions): `decision`, `decisionReason`,
    /// `transactionIdentifier`, certificate, thumbprint, signature time.
    fn attribute_array(&self) -> AttributeArray {
        let array = AttributeArray::new()
            .flag(self.decision)
            .opt_text(self.decision_reason.as_deref())
            .uuid(&self.transaction_identifier);
        self.signature_info.extend(array)
    }
}

/// Exchange of the symmetric key material protecting a transaction.
///
/// The key material itself is signed by the data signer (the inner
/// `DigitalSignatureValue`); the envelope as a whole is signed by the
/// envelope signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionKeyEnvelope {
    /// The wrapped symmetric encryption key (wire string form).
    #[serde(rename = "encryptionKey")]
    pub encryption_key: String,

    /// The initialization vector (wire string form).
    pub iv: String,

    /// The transaction this key material belongs to.
    #[serde(rename = "transactionIdentifier")]
    pub transaction_identifier: Uuid,

    /// Signature over the key material by the data signer.
    #[serde(rename = "digitalSignatureValue")]
    pub digital_signature_value: DigitalSignatureValue,

    /// Envelope signing metadata.
    #[serde(flatten)]
    pub signature_info: EnvelopeSignatureInfo,
}

impl Signable for EncryptionKeyEnvelope {
    /// Fixed order (9 positions): `encryptionKey`, `iv`,
    /// `transactionIdentifier`, `publicRootCertificateThumbprint`,
    /// `publicCertificate` (list form), `digitalSignature`, certificate,
    /// thumbprint, signature time.
    fn attribute_array(&self) -> AttributeArray {
        let array = AttributeArray::new()
            .text(&self.encryption_key)
            .text(&self.iv)
            .uuid(&self.transaction_identifier)
            .text(&self.digital_signature_value.public_root_certificate_thumbprint)
            .string_array(&self.digital_signature_value.public_certificate)
            .text(&self.digital_signature_value.digital_signature);
        self.signature_info.extend(array)
    }
}

/// Summary of an available data product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEnvelope {
    /// Reference to the summarized data, when assigned.
    #[serde(rename = "dataReference")]
    pub data_reference: Option<Uuid>,

    /// True if the referenced data is stored encrypted.
    #[serde(rename = "dataProtection")]
    pub data_protection: bool,

    /// True if the referenced data is stored compressed.
    #[serde(rename = "dataCompressedFlag")]
    pub data_compressed_flag: bool,

    /// Container type of the data product.
    #[serde(rename = "containerType")]
    pub container_type: ContainerType,

    /// Data product type identifier (catalog value, carried opaque here).
    #[serde(rename = "dataProductType")]
    pub data_product_type: String,

    /// Envelope signing metadata.
    #[serde(flatten)]
    pub signature_info: EnvelopeSignatureInfo,
}

impl Signable for SummaryEnvelope {
    /// Fixed order (8 positions): `dataReference`, `dataProtection`,
    /// `dataCompressedFlag`, `containerType`, `dataProductType`,
    /// certificate, thumbprint, signature time.
    fn attribute_array(&self) -> AttributeArray {
        let array = AttributeArray::new()
            .opt_uuid(self.data_reference.as_ref())
            .flag(self.data_protection)
            .flag(self.data_compressed_flag)
            .text(self.container_type.as_str())
            .text(&self.data_product_type);
        self.signature_info.extend(array)
    }
}

/// Publication of a service's public certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyEnvelope {
    /// The published certificate (PEM).
    #[serde(rename = "publicCertificate")]
    pub public_certificate: String,

    /// Envelope signing metadata.
    #[serde(flatten)]
    pub signature_info: EnvelopeSignatureInfo,
}

impl Signable for PublicKeyEnvelope {
    /// Fixed order (4 positions): `publicCertificate`, certificate,
    /// thumbprint, signature time.
    fn attribute_array(&self) -> AttributeArray {
        let array = AttributeArray::new().text(&self.public_certificate);
        self.signature_info.extend(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_info() -> EnvelopeSignatureInfo {
        EnvelopeSignatureInfo {
            envelope_signature_certificate: Some("envelope-cert-pem".into()),
            envelope_root_certificate_thumbprint: Some("cd".repeat(32)),
            envelope_signature_time: Some(SignatureTime::parse("2026-01-15T12:00:00Z").unwrap()),
            digital_signature_reference: Some(SignatureScheme::Ecdsa),
        }
    }

    #[test]
    fn test_acknowledgement_attribute_order() {
        let env = AcknowledgementEnvelope {
            created_at: SignatureTime::parse("1970-01-01T00:00:10Z").unwrap(),
            transaction_identifier: Uuid::nil(),
            ack_type: AckType::Delivered,
            nack_type: None,
            signature_info: EnvelopeSignatureInfo::default(),
        };
        let array = env.attribute_array();
        assert_eq!(array.len(), 7);
        assert_eq!(array.fields()[0], "10");
        assert_eq!(array.fields()[1], "00000000-0000-0000-0000-000000000000");
        assert_eq!(array.fields()[2], "DELIVERED");
        assert_eq!(array.fields()[3], "");
    }

    #[test]
    fn test_access_notification_attribute_order() {
        let env = AccessNotificationEnvelope {
            decision: true,
            decision_reason: Some("Test".into()),
            transaction_identifier: Uuid::nil(),
            signature_info: signed_info(),
        };
        let array = env.attribute_array();
        assert_eq!(array.len(), 6);
        assert_eq!(array.fields()[0], "true");
        assert_eq!(array.fields()[1], "Test");
        assert_eq!(array.fields()[5], "1768478400");
    }

    #[test]
    fn test_absent_reason_keeps_position() {
        let env = AccessNotificationEnvelope {
            decision: false,
            decision_reason: None,
            transaction_identifier: Uuid::nil(),
            signature_info: EnvelopeSignatureInfo::default(),
        };
        let array = env.attribute_array();
        assert_eq!(array.len(), 6);
        assert_eq!(array.fields()[1], "");
    }

    #[test]
    fn test_encryption_key_envelope_nine_positions() {
        let env = EncryptionKeyEnvelope {
            encryption_key: "encryptionKey".into(),
            iv: "iv".into(),
            transaction_identifier: Uuid::nil(),
            digital_signature_value: DigitalSignatureValue {
                public_certificate: vec!["certA".into(), "certB".into()],
                public_root_certificate_thumbprint: "thumb".into(),
                digital_signature: "sigHex".into(),
            },
            signature_info: signed_info(),
        };
        let array = env.attribute_array();
        assert_eq!(array.len(), 9);
        assert_eq!(array.fields()[0], "encryptionKey");
        assert_eq!(array.fields()[1], "iv");
        assert_eq!(array.fields()[3], "thumb");
        assert_eq!(array.fields()[4], "[certA, certB]");
        assert_eq!(array.fields()[5], "sigHex");
        assert_eq!(array.fields()[6], "envelope-cert-pem");
    }

    #[test]
    fn test_summary_attribute_order() {
        let env = SummaryEnvelope {
            data_reference: None,
            data_protection: true,
            data_compressed_flag: false,
            container_type: ContainerType::S100Dataset,
            data_product_type: "S101".into(),
            signature_info: EnvelopeSignatureInfo::default(),
        };
        let array = env.attribute_array();
        assert_eq!(array.len(), 8);
        assert_eq!(array.fields()[0], "");
        assert_eq!(array.fields()[1], "true");
        assert_eq!(array.fields()[3], "S100_DATASET");
        assert_eq!(array.fields()[4], "S101");
    }

    #[test]
    fn test_public_key_attribute_order() {
        let env = PublicKeyEnvelope {
            public_certificate: "published-pem".into(),
            signature_info: EnvelopeSignatureInfo::default(),
        };
        let array = env.attribute_array();
        assert_eq!(array.len(), 4);
        assert_eq!(array.fields()[0], "published-pem");
    }

    #[test]
    fn test_signing_payload_deterministic() {
        let env = AccessNotificationEnvelope {
            decision: true,
            decision_reason: Some("Test".into()),
            transaction_identifier: Uuid::new_v4(),
            signature_info: signed_info(),
        };
        assert_eq!(
            env.signing_payload().as_bytes(),
            env.signing_payload().as_bytes()
        );
    }

    #[test]
    fn test_envelope_serde_roundtrip() {
        let env = AccessNotificationEnvelope {
            decision: true,
            decision_reason: Some("Test".into()),
            transaction_identifier: Uuid::new_v4(),
            signature_info: signed_info(),
        };
        let json = serde_json::to_string(&env).unwrap();
        let parsed: AccessNotificationEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(env, parsed);
        // Recomputed signing input is identical after a wire round trip.
        assert_eq!(
            env.signing_payload().as_bytes(),
            parsed.signing_payload().as_bytes()
        );
    }

    #[test]
    fn test_flattened_signature_info_wire_names() {
        let env = PublicKeyEnvelope {
            public_certificate: "pem".into(),
            signature_info: signed_info(),
        };
        let json: serde_json::Value = serde_json::to_value(&env).unwrap();
        assert!(json.get("envelopeSignatureCertificate").is_some());
        assert!(json.get("envelopeRootCertificateThumbprint").is_some());
        assert!(json.get("envelopeSignatureTime").is_some());
        assert_eq!(json["digitalSignatureReference"], "ecdsa");
    }
}
