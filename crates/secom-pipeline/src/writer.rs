//! # Envelope Writer — Outbound Protection Chain
//!
//! Applies the sender's configured protections to outgoing message bodies
//! and produces the signature material receivers verify against.
//!
//! ## Security Invariant
//!
//! Compression runs strictly before encryption: ciphertext does not
//! compress, and compressing after encryption would leak plaintext
//! structure through the ciphertext length. Signing always happens last,
//! over the payload exactly as transmitted.

use secom_core::{SecomError, Signable, SignatureTime};
use secom_envelope::{
    DigitalSignatureValue, EnvelopeSignatureInfo, ExchangeMetadata, ProtectionCapabilities,
    UploadEnvelope,
};
use secom_pki::CertificateBundle;

use crate::provider::{CompressionProvider, EncryptionProvider, SignatureProvider};

/// Outbound protection pipeline over injected providers.
///
/// Every provider is optional; an absent provider means that protection is
/// simply not applied and the metadata says so.
#[derive(Default)]
pub struct EnvelopeWriter {
    compressor: Option<Box<dyn CompressionProvider>>,
    encryptor: Option<Box<dyn EncryptionProvider>>,
    signer: Option<Box<dyn SignatureProvider>>,
}

impl EnvelopeWriter {
    /// A writer that applies no protections.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compressor(mut self, compressor: Box<dyn CompressionProvider>) -> Self {
        self.compressor = Some(compressor);
        self
    }

    pub fn with_encryptor(mut self, encryptor: Box<dyn EncryptionProvider>) -> Self {
        self.encryptor = Some(encryptor);
        self
    }

    pub fn with_signer(mut self, signer: Box<dyn SignatureProvider>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// The protections this writer applies, for capability negotiation.
    pub fn capabilities(&self) -> ProtectionCapabilities {
        ProtectionCapabilities {
            compression: self.compressor.as_ref().map(|c| c.scheme()),
            encryption: self.encryptor.as_ref().map(|e| e.scheme()),
            signature: self.signer.as_ref().map(|s| s.scheme()),
        }
    }

    /// Protect a message body, recording what was applied in `metadata`.
    ///
    /// Compression first, then encryption. Absent providers pass the body
    /// through untouched.
    pub fn protect(
        &self,
        body: Vec<u8>,
        metadata: &mut ExchangeMetadata,
    ) -> Result<Vec<u8>, SecomError> {
        let mut body = body;
        if let Some(compressor) = &self.compressor {
            body = compressor.compress(&body)?;
            metadata.compression_flag = true;
            metadata.compression_algorithm = Some(compressor.scheme());
        }
        if let Some(encryptor) = &self.encryptor {
            body = encryptor.encrypt(&body)?;
            metadata.data_protection = true;
            metadata.encryption_algorithm = Some(encryptor.scheme());
        }
        Ok(body)
    }

    /// Sign a canonical subject, producing the full signature triple.
    ///
    /// Requires a signature provider holding a certificate chain.
    pub fn sign_envelope<S: Signable>(
        &self,
        subject: &S,
    ) -> Result<DigitalSignatureValue, SecomError> {
        let signer = self.require_signer()?;
        let chain = signer.certificate_chain();
        let root_thumbprint = signer.root_thumbprint().ok_or_else(|| {
            SecomError::Signing("signature provider holds no certificate chain".into())
        })?;
        let signature = signer.sign(&subject.signing_payload())?;
        Ok(DigitalSignatureValue {
            public_certificate: chain.iter().map(CertificateBundle::to_pem).collect(),
            public_root_certificate_thumbprint: root_thumbprint,
            digital_signature: hex::encode(signature),
        })
    }

    /// Fill envelope signing metadata from the configured signer.
    ///
    /// Stamps the leaf certificate, root thumbprint, current UTC second,
    /// and scheme. Call before [`Self::sign_envelope`] so the stamped
    /// values are covered by the signature.
    pub fn stamp_signature_info(&self, info: &mut EnvelopeSignatureInfo) -> Result<(), SecomError> {
        let signer = self.require_signer()?;
        let leaf = signer.certificate_chain().first().ok_or_else(|| {
            SecomError::Signing("signature provider holds no certificate chain".into())
        })?;
        info.envelope_signature_certificate = Some(leaf.to_pem());
        info.envelope_root_certificate_thumbprint = signer.root_thumbprint();
        info.envelope_signature_time = Some(SignatureTime::now());
        info.digital_signature_reference = Some(signer.scheme());
        Ok(())
    }

    /// Protect and, when a signer is configured, sign an upload envelope.
    ///
    /// The signature covers the transmitted state, so the scheme identifier
    /// goes into the metadata before the payload is signed. Without a
    /// signer the envelope goes out unsigned.
    pub fn seal_upload(&self, envelope: &mut UploadEnvelope) -> Result<(), SecomError> {
        let body = std::mem::take(&mut envelope.data);
        envelope.data = self.protect(body, &mut envelope.exchange_metadata)?;
        if let Some(signer) = &self.signer {
            envelope.exchange_metadata.digital_signature_reference = Some(signer.scheme());
            envelope.digital_signature_value = Some(self.sign_envelope(&*envelope)?);
        }
        Ok(())
    }

    fn require_signer(&self) -> Result<&dyn SignatureProvider, SecomError> {
        self.signer
            .as_deref()
            .ok_or_else(|| SecomError::Signing("no signature provider configured".into()))
    }
}
