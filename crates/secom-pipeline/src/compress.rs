//! # Deflate Compression
//!
//! The `zip` scheme: raw DEFLATE streams via `flate2`, no container framing.

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use secom_core::{CompressionScheme, SecomError};

use crate::provider::CompressionProvider;

/// DEFLATE compressor backing the `zip` scheme token.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeflateCompressor;

impl CompressionProvider for DeflateCompressor {
    fn scheme(&self) -> CompressionScheme {
        CompressionScheme::Zip
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, SecomError> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(data)
            .and_then(|_| encoder.finish())
            .map_err(|e| SecomError::Compression(format!("deflate failed: {e}")))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, SecomError> {
        let mut out = Vec::new();
        DeflateDecoder::new(data)
            .read_to_end(&mut out)
            .map_err(|e| SecomError::Compression(format!("inflate failed: {e}")))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_preserves_bytes() {
        let compressor = DeflateCompressor;
        let payload = b"maritime data product payload".to_vec();
        let compressed = compressor.compress(&payload).unwrap();
        assert_eq!(compressor.decompress(&compressed).unwrap(), payload);
    }

    #[test]
    fn test_repetitive_payload_shrinks() {
        let compressor = DeflateCompressor;
        let payload = vec![b'x'; 4096];
        let compressed = compressor.compress(&payload).unwrap();
        assert!(compressed.len() < payload.len());
    }

    #[test]
    fn test_empty_payload_roundtrip() {
        let compressor = DeflateCompressor;
        let compressed = compressor.compress(&[]).unwrap();
        assert!(compressor.decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn test_scheme_token() {
        assert_eq!(DeflateCompressor.scheme().token(), "zip");
    }
}
