//! # Capability Document — Protection Negotiation
//!
//! Producers and consumers agree out-of-band (or via this document) on which
//! of compression, encryption, and signature are active and which algorithm
//! each uses, before exchanging protected payloads.

use serde::{Deserialize, Serialize};

use secom_core::{CompressionScheme, EncryptionScheme, SignatureScheme};

/// The protections a service applies, with their negotiated algorithms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionCapabilities {
    /// Compression scheme, when compression is active.
    #[serde(rename = "compression", skip_serializing_if = "Option::is_none")]
    pub compression: Option<CompressionScheme>,

    /// Encryption scheme, when encryption is active.
    #[serde(rename = "encryption", skip_serializing_if = "Option::is_none")]
    pub encryption: Option<EncryptionScheme>,

    /// Signature scheme, when messages are signed.
    #[serde(rename = "signature", skip_serializing_if = "Option::is_none")]
    pub signature: Option<SignatureScheme>,
}

impl ProtectionCapabilities {
    /// No protections active.
    pub fn none() -> Self {
        Self::default()
    }

    /// True if both parties run the exact same protections and algorithms.
    pub fn agrees_with(&self, other: &Self) -> bool {
        self == other
    }

    /// True if every protection `other` declares is one this side also runs,
    /// with the same algorithm. Protections `other` leaves inactive are
    /// always acceptable.
    pub fn supports(&self, other: &Self) -> bool {
        fn covers<T: PartialEq>(ours: &Option<T>, theirs: &Option<T>) -> bool {
            match theirs {
                None => true,
                Some(_) => ours == theirs,
            }
        }
        covers(&self.compression, &other.compression)
            && covers(&self.encryption, &other.encryption)
            && covers(&self.signature, &other.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agreement_requires_exact_match() {
        let a = ProtectionCapabilities {
            compression: Some(CompressionScheme::Zip),
            encryption: None,
            signature: Some(SignatureScheme::Ecdsa),
        };
        let b = a;
        assert!(a.agrees_with(&b));

        let c = ProtectionCapabilities {
            signature: Some(SignatureScheme::Dsa),
            ..a
        };
        assert!(!a.agrees_with(&c));
    }

    #[test]
    fn test_supports_accepts_subset_but_not_mismatch() {
        let ours = ProtectionCapabilities {
            compression: Some(CompressionScheme::Zip),
            encryption: Some(EncryptionScheme::AesCbcPkcs7),
            signature: Some(SignatureScheme::Ecdsa),
        };

        // Unprotected traffic and a partial declaration are both fine.
        assert!(ours.supports(&ProtectionCapabilities::none()));
        assert!(ours.supports(&ProtectionCapabilities {
            signature: Some(SignatureScheme::Ecdsa),
            ..ProtectionCapabilities::none()
        }));

        // An algorithm we do not run is not.
        assert!(!ours.supports(&ProtectionCapabilities {
            signature: Some(SignatureScheme::Dsa),
            ..ProtectionCapabilities::none()
        }));

        // A protection we never configured is not either.
        assert!(!ProtectionCapabilities::none().supports(&ours));
    }

    #[test]
    fn test_serde_uses_tokens() {
        let caps = ProtectionCapabilities {
            compression: Some(CompressionScheme::Zip),
            encryption: Some(EncryptionScheme::AesCbcPkcs7),
            signature: Some(SignatureScheme::Dsa),
        };
        let json: serde_json::Value = serde_json::to_value(caps).unwrap();
        assert_eq!(json["compression"], "zip");
        assert_eq!(json["encryption"], "aes_cbc_pkcs7");
        assert_eq!(json["signature"], "dsa");
    }

    #[test]
    fn test_inactive_capabilities_omitted() {
        let json: serde_json::Value =
            serde_json::to_value(ProtectionCapabilities::none()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
