//! # Provider Traits — Injected Pipeline Capabilities
//!
//! One trait per protection concern. The writer and reader hold providers
//! as trait objects; which concrete algorithm runs is decided at wiring
//! time, and the algorithm identifier travels in the exchange metadata.

use secom_core::{
    CompressionScheme, EncryptionScheme, SecomError, SignatureScheme, SigningPayload,
};
use secom_pki::CertificateBundle;

/// Lossless payload compression.
pub trait CompressionProvider: Send + Sync {
    /// The algorithm identifier written to the exchange metadata.
    fn scheme(&self) -> CompressionScheme;

    /// Compress a payload.
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, SecomError>;

    /// Invert [`Self::compress`].
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, SecomError>;
}

/// Symmetric payload encryption.
pub trait EncryptionProvider: Send + Sync {
    /// The algorithm identifier written to the exchange metadata.
    fn scheme(&self) -> EncryptionScheme;

    /// Encrypt a payload.
    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecomError>;

    /// Invert [`Self::encrypt`].
    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecomError>;
}

/// Digital signing with an attached certificate chain.
pub trait SignatureProvider: Send + Sync {
    /// The algorithm identifier written to the exchange metadata.
    fn scheme(&self) -> SignatureScheme;

    /// Sign a canonical payload, returning DER signature bytes.
    fn sign(&self, payload: &SigningPayload) -> Result<Vec<u8>, SecomError>;

    /// The signer's certificate chain, leaf first, root last.
    ///
    /// May be empty for raw-key signers that never emit a
    /// `DigitalSignatureValue`.
    fn certificate_chain(&self) -> &[CertificateBundle];

    /// Thumbprint of the root the chain anchors to, when a chain is held.
    fn root_thumbprint(&self) -> Option<String> {
        self.certificate_chain()
            .last()
            .map(CertificateBundle::thumbprint)
    }
}
