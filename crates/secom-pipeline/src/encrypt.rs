//! # AES-CBC Encryption
//!
//! The `aes_cbc_pkcs7` scheme: AES in CBC mode with PKCS#7 padding, keyed
//! with 128- or 256-bit material plus a 16-byte IV.
//!
//! ## Security Invariant
//!
//! Key and IV lengths are validated at construction, so a live encryptor
//! always holds usable material. Decryption failures (bad padding, corrupt
//! ciphertext) surface as a typed decryption error without detail useful to
//! a padding oracle.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;

use secom_core::{EncryptionScheme, SecomError};

use crate::provider::EncryptionProvider;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// AES block size, which is also the required IV length.
const IV_LEN: usize = 16;

/// AES-CBC encryptor over held key material.
#[derive(Clone)]
pub struct AesCbcEncryptor {
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl AesCbcEncryptor {
    /// Build an encryptor from existing key material.
    ///
    /// The key must be 16 or 32 bytes, the IV exactly 16.
    pub fn new(key: Vec<u8>, iv: Vec<u8>) -> Result<Self, SecomError> {
        if key.len() != 16 && key.len() != 32 {
            return Err(SecomError::Encryption(format!(
                "AES key must be 16 or 32 bytes, got {}",
                key.len()
            )));
        }
        if iv.len() != IV_LEN {
            return Err(SecomError::Encryption(format!(
                "IV must be {IV_LEN} bytes, got {}",
                iv.len()
            )));
        }
        Ok(Self { key, iv })
    }

    /// Generate a fresh AES-256 key and IV from the OS entropy source.
    pub fn generate() -> Self {
        let mut key = vec![0u8; 32];
        let mut iv = vec![0u8; IV_LEN];
        OsRng.fill_bytes(&mut key);
        OsRng.fill_bytes(&mut iv);
        Self { key, iv }
    }

    /// The raw key bytes, for key-exchange envelopes.
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// The raw IV bytes, for key-exchange envelopes.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }
}

impl std::fmt::Debug for AesCbcEncryptor {
    /// Key material never appears in debug output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesCbcEncryptor")
            .field("key_bits", &(self.key.len() * 8))
            .finish_non_exhaustive()
    }
}

impl EncryptionProvider for AesCbcEncryptor {
    fn scheme(&self) -> EncryptionScheme {
        EncryptionScheme::AesCbcPkcs7
    }

    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecomError> {
        match self.key.len() {
            16 => Aes128CbcEnc::new_from_slices(&self.key, &self.iv)
                .map(|cipher| cipher.encrypt_padded_vec_mut::<Pkcs7>(data))
                .map_err(|e| SecomError::Encryption(format!("cipher setup failed: {e}"))),
            32 => Aes256CbcEnc::new_from_slices(&self.key, &self.iv)
                .map(|cipher| cipher.encrypt_padded_vec_mut::<Pkcs7>(data))
                .map_err(|e| SecomError::Encryption(format!("cipher setup failed: {e}"))),
            other => Err(SecomError::Encryption(format!(
                "unusable AES key length {other}"
            ))),
        }
    }

    fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, SecomError> {
        let decrypted = match self.key.len() {
            16 => Aes128CbcDec::new_from_slices(&self.key, &self.iv)
                .map_err(|e| SecomError::Decryption(format!("cipher setup failed: {e}")))?
                .decrypt_padded_vec_mut::<Pkcs7>(data),
            32 => Aes256CbcDec::new_from_slices(&self.key, &self.iv)
                .map_err(|e| SecomError::Decryption(format!("cipher setup failed: {e}")))?
                .decrypt_padded_vec_mut::<Pkcs7>(data),
            other => {
                return Err(SecomError::Decryption(format!(
                    "unusable AES key length {other}"
                )))
            }
        };
        decrypted.map_err(|_| SecomError::Decryption("ciphertext rejected".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes256_roundtrip() {
        let enc = AesCbcEncryptor::generate();
        let payload = b"navigational warning in force".to_vec();
        let ciphertext = enc.encrypt(&payload).unwrap();
        assert_ne!(ciphertext, payload);
        assert_eq!(enc.decrypt(&ciphertext).unwrap(), payload);
    }

    #[test]
    fn test_aes128_roundtrip() {
        let enc = AesCbcEncryptor::new(vec![7u8; 16], vec![9u8; 16]).unwrap();
        let payload = vec![0u8, 1, 2, 3, 255];
        assert_eq!(enc.decrypt(&enc.encrypt(&payload).unwrap()).unwrap(), payload);
    }

    #[test]
    fn test_bad_key_length_rejected() {
        assert!(AesCbcEncryptor::new(vec![0u8; 24], vec![0u8; 16]).is_err());
        assert!(AesCbcEncryptor::new(vec![0u8; 32], vec![0u8; 12]).is_err());
    }

    #[test]
    fn test_tampered_ciphertext_rejected() {
        let enc = AesCbcEncryptor::generate();
        let mut ciphertext = enc.encrypt(b"payload").unwrap();
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0xff;
        assert!(matches!(
            enc.decrypt(&ciphertext),
            Err(SecomError::Decryption(_))
        ));
    }

    #[test]
    fn test_wrong_key_never_recovers_plaintext() {
        let payload = b"payload bytes that span two blocks at least".to_vec();
        let enc = AesCbcEncryptor::new(vec![1u8; 32], vec![2u8; 16]).unwrap();
        let other = AesCbcEncryptor::new(vec![3u8; 32], vec![2u8; 16]).unwrap();
        let ciphertext = enc.encrypt(&payload).unwrap();
        // Unpadding may or may not fail, but the plaintext never comes back.
        match other.decrypt(&ciphertext) {
            Ok(recovered) => assert_ne!(recovered, payload),
            Err(SecomError::Decryption(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_debug_hides_key_material() {
        let enc = AesCbcEncryptor::new(vec![0xaa; 32], vec![0xbb; 16]).unwrap();
        let rendered = format!("{enc:?}");
        assert!(!rendered.contains("aa"));
        assert!(rendered.contains("key_bits"));
    }
}
