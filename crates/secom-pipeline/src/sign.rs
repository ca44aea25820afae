//! # Digital Signing — ECDSA and DSA Providers
//!
//! Signature providers over the canonical signing payload, plus the free
//! verification entry point the reader uses. Both schemes hash with SHA-256
//! and emit ASN.1 DER signatures, so the wire form is scheme-agnostic hex.

use dsa::signature::{DigestSigner, DigestVerifier, SignatureEncoding};
use p256::ecdsa::signature::{Signer, Verifier};
use p256::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use secom_core::{SecomError, SignatureScheme, SigningPayload};
use secom_pki::CertificateBundle;

use crate::provider::SignatureProvider;

/// ECDSA P-256 signer with its certificate chain.
pub struct EcdsaSigner {
    key: p256::ecdsa::SigningKey,
    chain: Vec<CertificateBundle>,
}

impl EcdsaSigner {
    /// Wrap an existing signing key and its chain (leaf first, root last).
    pub fn new(key: p256::ecdsa::SigningKey, chain: Vec<CertificateBundle>) -> Self {
        Self { key, chain }
    }

    /// Load the signing key from PKCS#8 DER.
    pub fn from_pkcs8_der(der: &[u8], chain: Vec<CertificateBundle>) -> Result<Self, SecomError> {
        let key = p256::ecdsa::SigningKey::from_pkcs8_der(der)
            .map_err(|e| SecomError::Signing(format!("not a P-256 PKCS#8 key: {e}")))?;
        Ok(Self { key, chain })
    }

    /// The verifying key as SubjectPublicKeyInfo DER.
    pub fn public_key_der(&self) -> Result<Vec<u8>, SecomError> {
        self.key
            .verifying_key()
            .to_public_key_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| SecomError::Signing(format!("cannot encode public key: {e}")))
    }
}

impl SignatureProvider for EcdsaSigner {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Ecdsa
    }

    fn sign(&self, payload: &SigningPayload) -> Result<Vec<u8>, SecomError> {
        let signature: p256::ecdsa::Signature = self
            .key
            .try_sign(payload.as_bytes())
            .map_err(|e| SecomError::Signing(format!("ECDSA signing failed: {e}")))?;
        Ok(signature.to_der().as_bytes().to_vec())
    }

    fn certificate_chain(&self) -> &[CertificateBundle] {
        &self.chain
    }
}

/// DSA signer (2048/256 with SHA-256) with its certificate chain.
pub struct DsaSigner {
    key: dsa::SigningKey,
    chain: Vec<CertificateBundle>,
}

impl DsaSigner {
    /// Wrap an existing signing key and its chain (leaf first, root last).
    pub fn new(key: dsa::SigningKey, chain: Vec<CertificateBundle>) -> Self {
        Self { key, chain }
    }

    /// Generate fresh 2048/256 domain parameters and a key pair.
    ///
    /// Parameter generation searches for primes and takes noticeable time;
    /// long-lived services generate once and reuse.
    pub fn generate(chain: Vec<CertificateBundle>) -> Self {
        let mut rng = OsRng;
        let components = dsa::Components::generate(&mut rng, dsa::KeySize::DSA_2048_256);
        let key = dsa::SigningKey::generate(&mut rng, components);
        Self { key, chain }
    }

    /// The verifying key as SubjectPublicKeyInfo DER.
    pub fn public_key_der(&self) -> Result<Vec<u8>, SecomError> {
        self.key
            .verifying_key()
            .to_public_key_der()
            .map(|doc| doc.as_bytes().to_vec())
            .map_err(|e| SecomError::Signing(format!("cannot encode public key: {e}")))
    }
}

impl SignatureProvider for DsaSigner {
    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Dsa
    }

    fn sign(&self, payload: &SigningPayload) -> Result<Vec<u8>, SecomError> {
        let signature: dsa::Signature = self
            .key
            .try_sign_digest(Sha256::new_with_prefix(payload.as_bytes()))
            .map_err(|e| SecomError::Signing(format!("DSA signing failed: {e}")))?;
        Ok(signature.to_vec())
    }

    fn certificate_chain(&self) -> &[CertificateBundle] {
        &self.chain
    }
}

/// Verify a DER signature over a canonical payload.
///
/// `spki_der` is the signer's public key as SubjectPublicKeyInfo DER,
/// normally lifted from the leaf certificate of the presented chain.
pub fn verify_signature(
    scheme: SignatureScheme,
    spki_der: &[u8],
    payload: &SigningPayload,
    signature_der: &[u8],
) -> Result<(), SecomError> {
    match scheme {
        SignatureScheme::Ecdsa => {
            let key = p256::ecdsa::VerifyingKey::from_public_key_der(spki_der)
                .map_err(|e| SecomError::SignatureVerification(format!("not a P-256 key: {e}")))?;
            let signature = p256::ecdsa::Signature::from_der(signature_der).map_err(|e| {
                SecomError::SignatureVerification(format!("malformed DER signature: {e}"))
            })?;
            key.verify(payload.as_bytes(), &signature).map_err(|_| {
                SecomError::SignatureVerification("ECDSA signature does not match payload".into())
            })
        }
        SignatureScheme::Dsa => {
            let key = dsa::VerifyingKey::from_public_key_der(spki_der)
                .map_err(|e| SecomError::SignatureVerification(format!("not a DSA key: {e}")))?;
            let signature = dsa::Signature::try_from(signature_der).map_err(|e| {
                SecomError::SignatureVerification(format!("malformed DER signature: {e}"))
            })?;
            key.verify_digest(Sha256::new_with_prefix(payload.as_bytes()), &signature)
                .map_err(|_| {
                    SecomError::SignatureVerification("DSA signature does not match payload".into())
                })
        }
    }
}
