//! # Canonical Signing Payload — Deterministic Byte Production
//!
//! This module defines `AttributeArray` and `SigningPayload`, the sole
//! construction path for bytes used as digital signature input across the
//! stack.
//!
//! ## Security Invariant
//!
//! The `SigningPayload` newtype has a private inner field. The only way to
//! construct it is through `AttributeArray::into_payload()`, which renders
//! every signable attribute to its fixed textual form and joins the full
//! fixed-length array with `.`. Any function computing or verifying a
//! signature must accept `&SigningPayload`, so sender and receiver cannot
//! diverge on byte production.
//!
//! ## Rendering Rules
//!
//! Each attribute occupies exactly one position:
//!
//! - text — as-is; absent text renders as the empty string but **keeps its
//!   position**. Omitting a position would silently shift field alignment,
//!   which is exactly the defect class this module exists to prevent.
//! - binary — standard Base64.
//! - UUID — canonical hyphenated lowercase form.
//! - timestamp — Unix epoch seconds.
//! - boolean — `true` / `false`.
//! - string array — list form `[a, b]`.
//!
//! The attribute order of each envelope variant is part of the protocol
//! contract and must not change without a version bump.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use uuid::Uuid;

use crate::temporal::SignatureTime;

/// Field delimiter of the canonical signing string.
pub const FIELD_DELIMITER: char = '.';

/// Bytes produced exclusively by joining a fixed-order attribute array.
///
/// # Invariants
///
/// - The only constructor is [`AttributeArray::into_payload()`].
/// - The same attribute array always produces byte-identical output.
/// - Every attribute position is present, absent values included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SigningPayload(Vec<u8>);

impl SigningPayload {
    /// Access the canonical bytes for signature computation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for SigningPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Ordered collection of pre-rendered signable attributes.
///
/// Built field by field in the variant's documented order, then collapsed
/// into a [`SigningPayload`]. The builder renders each value at push time so
/// the array is always a flat `Vec<String>` with one entry per position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeArray {
    fields: Vec<String>,
}

impl AttributeArray {
    /// Start an empty attribute array.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text attribute.
    pub fn text(mut self, value: &str) -> Self {
        self.fields.push(value.to_string());
        self
    }

    /// Append an optional text attribute; `None` keeps its position as `""`.
    pub fn opt_text(mut self, value: Option<&str>) -> Self {
        self.fields.push(value.unwrap_or_default().to_string());
        self
    }

    /// Append a boolean attribute as `true` / `false`.
    pub fn flag(mut self, value: bool) -> Self {
        self.fields.push(value.to_string());
        self
    }

    /// Append a binary attribute as standard Base64.
    pub fn bytes(mut self, value: &[u8]) -> Self {
        self.fields.push(BASE64.encode(value));
        self
    }

    /// Append an optional binary attribute; `None` renders as `""`.
    pub fn opt_bytes(mut self, value: Option<&[u8]>) -> Self {
        self.fields
            .push(value.map(|v| BASE64.encode(v)).unwrap_or_default());
        self
    }

    /// Append a UUID in canonical hyphenated form.
    pub fn uuid(mut self, value: &Uuid) -> Self {
        self.fields.push(value.to_string());
        self
    }

    /// Append an optional UUID; `None` renders as `""`.
    pub fn opt_uuid(mut self, value: Option<&Uuid>) -> Self {
        self.fields
            .push(value.map(Uuid::to_string).unwrap_or_default());
        self
    }

    /// Append a timestamp as Unix epoch seconds.
    pub fn time(mut self, value: SignatureTime) -> Self {
        self.fields.push(value.epoch_secs().to_string());
        self
    }

    /// Append an optional timestamp; `None` renders as `""`.
    pub fn opt_time(mut self, value: Option<SignatureTime>) -> Self {
        self.fields
            .push(value.map(|t| t.epoch_secs().to_string()).unwrap_or_default());
        self
    }

    /// Append a string array in list form, e.g. `[a, b]`.
    pub fn string_array(mut self, values: &[String]) -> Self {
        self.fields.push(format!("[{}]", values.join(", ")));
        self
    }

    /// Number of attribute positions accumulated so far.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no attribute has been pushed.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The rendered fields in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Collapse the array into the canonical signing payload.
    ///
    /// Fields are joined with [`FIELD_DELIMITER`] into a single UTF-8 byte
    /// sequence. This is the only constructor of [`SigningPayload`].
    pub fn into_payload(self) -> SigningPayload {
        let delimiter = FIELD_DELIMITER.to_string();
        SigningPayload(self.fields.join(&delimiter).into_bytes())
    }
}

/// An envelope whose signable attributes have a fixed documented order.
///
/// Implemented once per envelope variant; the attribute order is the
/// protocol contract shared by the signer and the verifier. Verification
/// recomputes the payload from the *received* fields through this same
/// method, keeping the contract symmetric.
pub trait Signable {
    /// The full fixed-length attribute array in the variant's order.
    fn attribute_array(&self) -> AttributeArray;

    /// The canonical signing payload derived from the attribute array.
    fn signing_payload(&self) -> SigningPayload {
        self.attribute_array().into_payload()
    }
}
