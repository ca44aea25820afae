//! # secom-core — Foundational Types for the SECOM Envelope Stack
//!
//! This crate is the bedrock of the secure exchange stack. It defines the
//! primitives every other crate builds on; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`SigningPayload` newtype.** ALL signature computation flows through
//!    `AttributeArray::into_payload()`. No ad-hoc string concatenation for
//!    signing input. Ever. This keeps the sign/verify contract symmetric by
//!    construction.
//!
//! 2. **Tagged algorithm registries.** `CompressionScheme`,
//!    `EncryptionScheme`, and `SignatureScheme` carry their wire tokens and
//!    resolve tokens through fallible lookup — an unknown identifier is a
//!    hard `UnsupportedAlgorithm` error, never a silent `None`.
//!
//! 3. **UTC-only signature times.** `SignatureTime` enforces UTC with
//!    seconds precision; the canonical rendering is epoch seconds.
//!
//! 4. **Typed error taxonomy.** Every pipeline stage surfaces a `SecomError`
//!    variant; callers map errors to transport status via `SecomError::fault()`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `secom-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod algorithm;
pub mod canonical;
pub mod error;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use algorithm::{CompressionScheme, EncryptionScheme, SignatureScheme};
pub use canonical::{AttributeArray, Signable, SigningPayload};
pub use error::{CertificateRejection, Fault, SecomError};
pub use temporal::SignatureTime;
