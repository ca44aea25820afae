//! # Upload Envelope — The Message Body Bearer
//!
//! `UploadEnvelope` carries the actual data product through the pipeline.
//! In memory `data` is raw payload bytes (possibly compressed and encrypted
//! by the writer chain); on the wire it is framed as standard Base64 at the
//! serde boundary, so callers never hand-encode.

use serde::{Deserialize, Serialize};

use secom_core::{AttributeArray, Signable};

use crate::metadata::ExchangeMetadata;
use crate::signature::DigitalSignatureValue;

/// The data-bearing envelope transformed by the pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadEnvelope {
    /// The payload bytes, exactly as protected (post compress/encrypt).
    #[serde(rename = "data", with = "base64_bytes")]
    pub data: Vec<u8>,

    /// Flags and algorithm identifiers for the applied protections.
    #[serde(rename = "exchangeMetadata")]
    pub exchange_metadata: ExchangeMetadata,

    /// Signature over the protected payload, when the sender signs.
    #[serde(rename = "digitalSignatureValue", skip_serializing_if = "Option::is_none")]
    pub digital_signature_value: Option<DigitalSignatureValue>,

    /// True if the sender requests a delivery acknowledgement.
    #[serde(rename = "ackRequest")]
    pub ack_request: bool,
}

impl UploadEnvelope {
    /// A plain, unsigned envelope around raw payload bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            exchange_metadata: ExchangeMetadata::new(),
            digital_signature_value: None,
            ack_request: false,
        }
    }
}

impl Signable for UploadEnvelope {
    /// Fixed order (5 positions): `data` (Base64), `protectionScheme`,
    /// `digitalSignatureReference`, `dataProtection`, `compressionFlag`.
    ///
    /// The signature covers the payload as transmitted, so the receiver
    /// verifies before any decrypt/decompress step.
    fn attribute_array(&self) -> AttributeArray {
        AttributeArray::new()
            .bytes(&self.data)
            .text(&self.exchange_metadata.protection_scheme)
            .opt_text(
                self.exchange_metadata
                    .digital_signature_reference
                    .map(|s| s.token()),
            )
            .flag(self.exchange_metadata.data_protection)
            .flag(self.exchange_metadata.compression_flag)
    }
}

/// Base64 framing for payload bytes at the serde boundary.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64.decode(encoded.as_bytes()).map_err(serde::de::Error::custom)
    }
}
