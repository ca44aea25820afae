//! # secom-envelope — Envelope Types
//!
//! The wire-facing containers of the secure exchange stack:
//!
//! - **Metadata** (`metadata.rs`): per-message `ExchangeMetadata` flags and
//!   algorithm identifiers describing which protections were applied.
//!
//! - **Signature value** (`signature.rs`): `DigitalSignatureValue` — the
//!   signer's certificate chain, root thumbprint, and signature bytes.
//!
//! - **Envelopes** (`envelope.rs`): the signed envelope variants
//!   (acknowledgement, access notification, encryption key exchange,
//!   summary, public key), each with a fixed signable attribute order.
//!
//! - **Upload** (`upload.rs`): the data-bearing envelope transformed by the
//!   pipeline (compress → encrypt → sign).
//!
//! - **Capability** (`capability.rs`): the negotiation document enumerating
//!   active protections.
//!
//! ## Security Invariant
//!
//! Every envelope variant produces its signing input through
//! `secom_core::Signable` — one fixed-order attribute array per variant,
//! used identically for signing and verification.

pub mod capability;
pub mod envelope;
pub mod metadata;
pub mod signature;
pub mod upload;

pub use capability::ProtectionCapabilities;
pub use envelope::{
    AccessNotificationEnvelope, AcknowledgementEnvelope, AckType, ContainerType,
    EncryptionKeyEnvelope, EnvelopeSignatureInfo, NackType, PublicKeyEnvelope, SummaryEnvelope,
};
pub use metadata::{ExchangeMetadata, PROTECTION_SCHEME};
pub use signature::DigitalSignatureValue;
pub use upload::UploadEnvelope;
