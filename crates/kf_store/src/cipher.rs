//! Cipher engine: the process-wide field-encryption key.
//!
//! Constructed exactly once at startup from configuration and passed by
//! injection to the store; there is no runtime rotation and no ambient key
//! lookup.  Clones share one Arc'd key, zeroized when the last clone drops.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use zeroize::ZeroizeOnDrop;

use kf_crypto::{aead, CryptoError};

/// AAD domain tag binding every blob to this store's field format.
const FIELD_AAD: &[u8] = b"kf-field-v1";

#[derive(ZeroizeOnDrop)]
struct KeyInner([u8; 32]);

/// Handle to the static vault key.  Cheap to clone.
#[derive(Clone)]
pub struct CipherEngine {
    key: Arc<KeyInner>,
}

impl CipherEngine {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key: Arc::new(KeyInner(key)) }
    }

    /// Encrypt one plaintext field into a self-contained base64 blob
    /// (nonce || ciphertext+tag).
    pub fn encrypt_field(&self, plaintext: &str) -> Result<String, CryptoError> {
        let blob = aead::encrypt(&self.key.0, plaintext.as_bytes(), FIELD_AAD)?;
        Ok(URL_SAFE_NO_PAD.encode(blob))
    }

    /// Decrypt a blob produced by [`encrypt_field`](Self::encrypt_field)
    /// back to the exact original string.
    ///
    /// Bad base64, a failed tag check, and non-UTF-8 plaintext are all hard
    /// errors; a blob from a different key never decrypts to garbage.
    pub fn decrypt_field(&self, blob: &str) -> Result<String, CryptoError> {
        let data = URL_SAFE_NO_PAD.decode(blob)?;
        let plaintext = aead::decrypt(&self.key.0, &data, FIELD_AAD)?;
        String::from_utf8(plaintext.to_vec()).map_err(|_| CryptoError::FieldEncoding)
    }
}

impl std::fmt::Debug for CipherEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material must never reach logs.
        f.write_str("CipherEngine(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> CipherEngine {
        CipherEngine::new([42u8; 32])
    }

    #[test]
    fn field_round_trip() {
        let e = engine();
        let long = "n".repeat(3000);
        for s in ["secret1", "", "密码🔑", long.as_str()] {
            let blob = e.encrypt_field(s).unwrap();
            assert_ne!(blob, s);
            assert_eq!(e.decrypt_field(&blob).unwrap(), s);
        }
    }

    #[test]
    fn blob_from_other_key_is_a_hard_error() {
        let blob = engine().encrypt_field("secret1").unwrap();
        let other = CipherEngine::new([43u8; 32]);
        assert!(matches!(
            other.decrypt_field(&blob),
            Err(CryptoError::AeadDecrypt)
        ));
    }

    #[test]
    fn malformed_blob_is_a_hard_error() {
        let e = engine();
        assert!(e.decrypt_field("not base64 !!!").is_err());
        let blob = e.encrypt_field("secret1").unwrap();
        assert!(e.decrypt_field(&blob[..blob.len() / 2]).is_err());
    }
}
