//! # Algorithm Registries — Wire Tokens and Lookup
//!
//! Tagged enums for the three protection capabilities: compression,
//! encryption, and digital signature. Each variant carries its lower-case
//! wire token; lookup by token is fallible and an unknown identifier is a
//! hard `UnsupportedAlgorithm` error on receipt, never silently ignored.
//!
//! Serde renders every scheme as its wire token string, so negotiated
//! capability documents and exchange metadata carry the protocol tokens
//! verbatim.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SecomError;

/// Compression algorithm negotiated for payload bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionScheme {
    /// Deflate-family general purpose compression. Wire token `zip`.
    Zip,
}

/// Symmetric encryption algorithm negotiated for payload bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncryptionScheme {
    /// AES in CBC mode with PKCS#7 padding. Wire token `aes_cbc_pkcs7`.
    AesCbcPkcs7,
}

/// Asymmetric signature algorithm used for envelope signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureScheme {
    /// DSA over SHA-256, DER-encoded signatures. Wire token `dsa`.
    Dsa,
    /// ECDSA P-256 over SHA-256, DER-encoded signatures. Wire token `ecdsa`.
    Ecdsa,
}

impl CompressionScheme {
    /// The lower-case wire token for this scheme.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Zip => "zip",
        }
    }

    /// Resolve a wire token, rejecting unknown identifiers.
    pub fn from_token(token: &str) -> Result<Self, SecomError> {
        match token {
            "zip" => Ok(Self::Zip),
            other => Err(SecomError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl EncryptionScheme {
    /// The lower-case wire token for this scheme.
    pub fn token(&self) -> &'static str {
        match self {
            Self::AesCbcPkcs7 => "aes_cbc_pkcs7",
        }
    }

    /// Resolve a wire token, rejecting unknown identifiers.
    pub fn from_token(token: &str) -> Result<Self, SecomError> {
        match token {
            "aes_cbc_pkcs7" => Ok(Self::AesCbcPkcs7),
            other => Err(SecomError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl SignatureScheme {
    /// The lower-case wire token for this scheme.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Dsa => "dsa",
            Self::Ecdsa => "ecdsa",
        }
    }

    /// Resolve a wire token, rejecting unknown identifiers.
    pub fn from_token(token: &str) -> Result<Self, SecomError> {
        match token {
            "dsa" => Ok(Self::Dsa),
            "ecdsa" => Ok(Self::Ecdsa),
            other => Err(SecomError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

macro_rules! scheme_string_impls {
    ($ty:ident) => {
        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.token())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.token())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let token = String::deserialize(deserializer)?;
                $ty::from_token(&token).map_err(serde::de::Error::custom)
            }
        }
    };
}

scheme_string_impls!(CompressionScheme);
scheme_string_impls!(EncryptionScheme);
scheme_string_impls!(SignatureScheme);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_lowercase() {
        assert_eq!(CompressionScheme::Zip.token(), "zip");
        assert_eq!(EncryptionScheme::AesCbcPkcs7.token(), "aes_cbc_pkcs7");
        assert_eq!(SignatureScheme::Dsa.token(), "dsa");
        assert_eq!(SignatureScheme::Ecdsa.token(), "ecdsa");
    }

    #[test]
    fn test_token_roundtrip() {
        for scheme in [SignatureScheme::Dsa, SignatureScheme::Ecdsa] {
            assert_eq!(SignatureScheme::from_token(scheme.token()).unwrap(), scheme);
        }
        assert_eq!(
            CompressionScheme::from_token("zip").unwrap(),
            CompressionScheme::Zip
        );
        assert_eq!(
            EncryptionScheme::from_token("aes_cbc_pkcs7").unwrap(),
            EncryptionScheme::AesCbcPkcs7
        );
    }

    #[test]
    fn test_unknown_token_rejected() {
        let err = SignatureScheme::from_token("rsa").unwrap_err();
        match err {
            SecomError::UnsupportedAlgorithm(token) => assert_eq!(token, "rsa"),
            other => panic!("expected UnsupportedAlgorithm, got: {other}"),
        }
        assert!(CompressionScheme::from_token("zstd").is_err());
        assert!(EncryptionScheme::from_token("aes_gcm").is_err());
    }

    #[test]
    fn test_case_sensitive_lookup() {
        // Tokens are lower-case by contract; "ZIP" is a different identifier.
        assert!(CompressionScheme::from_token("ZIP").is_err());
        assert!(SignatureScheme::from_token("ECDSA").is_err());
    }

    #[test]
    fn test_serde_renders_token() {
        let json = serde_json::to_string(&SignatureScheme::Ecdsa).unwrap();
        assert_eq!(json, "\"ecdsa\"");
        let parsed: SignatureScheme = serde_json::from_str("\"dsa\"").unwrap();
        assert_eq!(parsed, SignatureScheme::Dsa);
    }

    #[test]
    fn test_serde_rejects_unknown_token() {
        let result: Result<EncryptionScheme, _> = serde_json::from_str("\"des\"");
        assert!(result.is_err());
    }
}
