//! # SECOM Pipeline — Outbound Protection and Inbound Verification
//!
//! The transformation pipeline around exchanged message bodies. Outbound,
//! the [`EnvelopeWriter`] compresses, encrypts, and signs; inbound, the
//! [`EnvelopeReader`] runs the verification state machine and inverts the
//! transformations its metadata flags call for.
//!
//! ## Security Invariant
//!
//! Compression always runs strictly before encryption on the way out, and
//! the inverse strictly after decryption on the way in. Signatures cover the
//! payload exactly as transmitted, so verification never depends on first
//! decrypting or decompressing anything.
//!
//! Providers are injected capabilities. A metadata flag with no matching
//! provider configured is a typed error, never a silent passthrough.

pub mod compress;
pub mod encrypt;
pub mod provider;
pub mod reader;
pub mod sign;
pub mod writer;

pub use compress::DeflateCompressor;
pub use encrypt::AesCbcEncryptor;
pub use provider::{CompressionProvider, EncryptionProvider, SignatureProvider};
pub use reader::{EnvelopeReader, Verification, VerificationState};
pub use sign::{verify_signature, DsaSigner, EcdsaSigner};
pub use writer::EnvelopeWriter;
