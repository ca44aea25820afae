//! # Envelope Reader — Inbound Verification State Machine
//!
//! Verifies received signatures and inverts the protections the exchange
//! metadata flags call for.
//!
//! ## Security Invariant
//!
//! Verification runs over the payload exactly as received, before any
//! decrypt or decompress step, and advances a strict state machine:
//! `Received → CertValidated → SignatureVerified → Accepted`. Any failure
//! terminates in `Rejected` with the typed error — an unverifiable
//! signature is never downgraded to "unsigned".
//!
//! The metadata flags, not provider presence, gate the inverse
//! transformations: a flag set with no matching provider configured is a
//! typed error.

use secom_core::{CertificateRejection, SecomError, Signable, SignatureScheme};
use secom_envelope::{DigitalSignatureValue, ExchangeMetadata, UploadEnvelope};
use secom_pki::{CertificateBundle, CertificateChainValidator, TrustContext};

use crate::provider::{CompressionProvider, EncryptionProvider};
use crate::sign::verify_signature;

/// Position in the inbound verification state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationState {
    /// Envelope received, nothing checked yet.
    Received,
    /// The signer's chain anchors to a trusted root.
    CertValidated,
    /// The signature matches the recomputed canonical payload.
    SignatureVerified,
    /// Terminal: the envelope is authentic and its content usable.
    Accepted,
    /// Terminal: verification failed; the envelope must not be processed.
    Rejected,
}

/// Outcome of a verification run.
#[derive(Debug)]
pub struct Verification {
    state: VerificationState,
    rejection: Option<SecomError>,
}

impl Verification {
    fn accepted() -> Self {
        Self {
            state: VerificationState::Accepted,
            rejection: None,
        }
    }

    fn rejected(error: SecomError) -> Self {
        Self {
            state: VerificationState::Rejected,
            rejection: Some(error),
        }
    }

    /// The terminal state reached.
    pub fn state(&self) -> VerificationState {
        self.state
    }

    pub fn is_accepted(&self) -> bool {
        self.state == VerificationState::Accepted
    }

    /// The error that caused rejection, when rejected.
    pub fn rejection(&self) -> Option<&SecomError> {
        self.rejection.as_ref()
    }

    /// Collapse into a `Result` for callers that only branch on pass/fail.
    pub fn into_result(self) -> Result<(), SecomError> {
        match self.rejection {
            None => Ok(()),
            Some(error) => Err(error),
        }
    }
}

/// Inbound verification and unprotection pipeline.
pub struct EnvelopeReader {
    trust: TrustContext,
    validator: CertificateChainValidator,
    compressor: Option<Box<dyn CompressionProvider>>,
    encryptor: Option<Box<dyn EncryptionProvider>>,
}

impl EnvelopeReader {
    /// A reader trusting `trust`, with default (soft-fail, no data)
    /// revocation checking and no unprotection providers.
    pub fn new(trust: TrustContext) -> Self {
        Self {
            trust,
            validator: CertificateChainValidator::default(),
            compressor: None,
            encryptor: None,
        }
    }

    /// Replace the chain validator, e.g. to wire in CRL data.
    pub fn with_validator(mut self, validator: CertificateChainValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_compressor(mut self, compressor: Box<dyn CompressionProvider>) -> Self {
        self.compressor = Some(compressor);
        self
    }

    pub fn with_encryptor(mut self, encryptor: Box<dyn EncryptionProvider>) -> Self {
        self.encryptor = Some(encryptor);
        self
    }

    /// Run the verification state machine over a received subject.
    ///
    /// The canonical payload is recomputed from the received fields; the
    /// signature and certificate chain come from `signature_value`; the
    /// scheme is the one the sender declared.
    pub fn verify<S: Signable>(
        &self,
        subject: &S,
        signature_value: &DigitalSignatureValue,
        scheme: SignatureScheme,
    ) -> Verification {
        let leaf = match self.validate_signer_certificate(signature_value) {
            Ok(leaf) => leaf,
            Err(error) => {
                tracing::debug!(%error, "certificate validation failed");
                return Verification::rejected(error);
            }
        };
        tracing::trace!(state = ?VerificationState::CertValidated, "signer chain anchors to a trusted root");

        if let Err(error) = self.check_signature(subject, signature_value, scheme, &leaf) {
            tracing::debug!(%error, "signature verification failed");
            return Verification::rejected(error);
        }
        tracing::trace!(state = ?VerificationState::SignatureVerified, "signature matches recomputed payload");

        Verification::accepted()
    }

    /// Invert the protections `metadata` records, in reverse order of
    /// application: decrypt first, then decompress.
    pub fn unprotect(
        &self,
        body: Vec<u8>,
        metadata: &ExchangeMetadata,
    ) -> Result<Vec<u8>, SecomError> {
        let mut body = body;
        if metadata.data_protection {
            let encryptor = self.encryptor.as_deref().ok_or_else(|| {
                SecomError::Decryption(
                    "payload is encrypted but no encryption provider is configured".into(),
                )
            })?;
            if let Some(declared) = metadata.encryption_algorithm {
                if declared != encryptor.scheme() {
                    return Err(SecomError::UnsupportedAlgorithm(declared.token().into()));
                }
            }
            body = encryptor.decrypt(&body)?;
        }
        if metadata.compression_flag {
            let compressor = self.compressor.as_deref().ok_or_else(|| {
                SecomError::Compression(
                    "payload is compressed but no compression provider is configured".into(),
                )
            })?;
            if let Some(declared) = metadata.compression_algorithm {
                if declared != compressor.scheme() {
                    return Err(SecomError::UnsupportedAlgorithm(declared.token().into()));
                }
            }
            body = compressor.decompress(&body)?;
        }
        Ok(body)
    }

    /// Verify (when the sender signed) and unprotect an upload envelope,
    /// returning the plain payload bytes.
    ///
    /// A metadata signature claim without an attached signature value is a
    /// validation error, never treated as unsigned.
    pub fn open_upload(&self, envelope: &UploadEnvelope) -> Result<Vec<u8>, SecomError> {
        if let Some(scheme) = envelope.exchange_metadata.digital_signature_reference {
            let signature_value = envelope.digital_signature_value.as_ref().ok_or_else(|| {
                SecomError::Validation(
                    "envelope claims a signature but carries no digitalSignatureValue".into(),
                )
            })?;
            self.verify(envelope, signature_value, scheme).into_result()?;
        }
        self.unprotect(envelope.data.clone(), &envelope.exchange_metadata)
    }

    fn validate_signer_certificate(
        &self,
        signature_value: &DigitalSignatureValue,
    ) -> Result<CertificateBundle, SecomError> {
        let leaf_pem = signature_value.leaf_certificate().ok_or_else(|| {
            SecomError::Validation("digitalSignatureValue carries no certificate".into())
        })?;
        let leaf = CertificateBundle::from_pem(leaf_pem)?;

        if !self
            .trust
            .contains_root_thumbprint(&signature_value.public_root_certificate_thumbprint)
        {
            return Err(SecomError::certificate(
                CertificateRejection::PathBuilding,
                "claimed root thumbprint matches no trusted root",
            ));
        }

        // The presented chain extends the local intermediate pool.
        let mut intermediates = self.trust.intermediates().to_vec();
        for pem in signature_value.chain_above_leaf() {
            intermediates.push(CertificateBundle::from_pem(pem)?);
        }
        self.validator
            .validate_with_sets(&leaf, self.trust.roots(), &intermediates)?;
        Ok(leaf)
    }

    fn check_signature<S: Signable>(
        &self,
        subject: &S,
        signature_value: &DigitalSignatureValue,
        scheme: SignatureScheme,
        leaf: &CertificateBundle,
    ) -> Result<(), SecomError> {
        let parsed = leaf.parse()?;
        let spki = parsed.public_key().raw;
        let signature = signature_value.signature_bytes()?;
        verify_signature(scheme, spki, &subject.signing_payload(), &signature)
    }
}
