//! Authenticated encryption for vault fields
//!
//! Uses XChaCha20-Poly1305 (192-bit nonce).
//! Key size: 32 bytes.  Nonce: 24 bytes (random).  Tag: 16 bytes.
//!
//! Ciphertext wire format:
//!   [ nonce (24 bytes) | ciphertext + tag ]
//!
//! The nonce is embedded in the blob, so decryption is self-contained
//! given only the blob and the static key.

use chacha20poly1305::{
    aead::{Aead, AeadCore, KeyInit, OsRng as AeadOsRng},
    XChaCha20Poly1305,
};
use zeroize::Zeroizing;

use crate::error::CryptoError;

pub const NONCE_LEN: usize = 24;

/// Encrypt `plaintext` with a 32-byte key, prepending a random 24-byte nonce.
/// `aad` is additional associated data (authenticated but not encrypted).
pub fn encrypt(key: &[u8; 32], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = XChaCha20Poly1305::new_from_slice(key)
        .map_err(|_| CryptoError::AeadEncrypt)?;

    let nonce = XChaCha20Poly1305::generate_nonce(&mut AeadOsRng);

    let ciphertext = cipher
        .encrypt(&nonce, chacha20poly1305::aead::Payload { msg: plaintext, aad })
        .map_err(|_| CryptoError::AeadEncrypt)?;

    // Prepend nonce
    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt wire-format bytes (nonce || ciphertext+tag).
///
/// Truncated input, a flipped bit anywhere in the blob, a wrong key, and
/// mismatched `aad` all fail with [`CryptoError::AeadDecrypt`]; the Poly1305
/// tag check never releases corrupted plaintext.
pub fn decrypt(key: &[u8; 32], data: &[u8], aad: &[u8]) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    if data.len() < NONCE_LEN {
        return Err(CryptoError::AeadDecrypt);
    }
    let (nonce_bytes, ct) = data.split_at(NONCE_LEN);
    let nonce = chacha20poly1305::XNonce::from_slice(nonce_bytes);

    let cipher = XChaCha20Poly1305::new_from_slice(key)
        .map_err(|_| CryptoError::AeadDecrypt)?;

    let plaintext = cipher
        .decrypt(nonce, chacha20poly1305::aead::Payload { msg: ct, aad })
        .map_err(|_| CryptoError::AeadDecrypt)?;

    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [7u8; 32];
    const AAD: &[u8] = b"kf-test";

    #[test]
    fn round_trips_plain_ascii() {
        let blob = encrypt(&KEY, b"secret1", AAD).unwrap();
        let pt = decrypt(&KEY, &blob, AAD).unwrap();
        assert_eq!(&*pt, b"secret1");
    }

    #[test]
    fn round_trips_empty_string() {
        let blob = encrypt(&KEY, b"", AAD).unwrap();
        let pt = decrypt(&KEY, &blob, AAD).unwrap();
        assert!(pt.is_empty());
    }

    #[test]
    fn round_trips_unicode() {
        let msg = "pǎsswörd-密码-🔑".as_bytes();
        let blob = encrypt(&KEY, msg, AAD).unwrap();
        let pt = decrypt(&KEY, &blob, AAD).unwrap();
        assert_eq!(&*pt, msg);
    }

    #[test]
    fn round_trips_multi_kb_notes() {
        let msg: Vec<u8> = "long note / ".bytes().cycle().take(4096).collect();
        let blob = encrypt(&KEY, &msg, AAD).unwrap();
        let pt = decrypt(&KEY, &blob, AAD).unwrap();
        assert_eq!(&*pt, &msg[..]);
    }

    #[test]
    fn nonce_is_random_per_call() {
        let a = encrypt(&KEY, b"same", AAD).unwrap();
        let b = encrypt(&KEY, b"same", AAD).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn flipping_any_byte_fails_decryption() {
        let blob = encrypt(&KEY, b"integrity matters", AAD).unwrap();
        for i in 0..blob.len() {
            let mut tampered = blob.clone();
            tampered[i] ^= 0x01;
            assert!(
                matches!(decrypt(&KEY, &tampered, AAD), Err(CryptoError::AeadDecrypt)),
                "byte {i} flip was not caught"
            );
        }
    }

    #[test]
    fn wrong_key_fails_decryption() {
        let blob = encrypt(&KEY, b"secret", AAD).unwrap();
        let other = [8u8; 32];
        assert!(matches!(decrypt(&other, &blob, AAD), Err(CryptoError::AeadDecrypt)));
    }

    #[test]
    fn truncated_blob_fails_decryption() {
        let blob = encrypt(&KEY, b"secret", AAD).unwrap();
        assert!(matches!(decrypt(&KEY, &blob[..10], AAD), Err(CryptoError::AeadDecrypt)));
        assert!(matches!(decrypt(&KEY, &[], AAD), Err(CryptoError::AeadDecrypt)));
    }

    #[test]
    fn aad_mismatch_fails_decryption() {
        let blob = encrypt(&KEY, b"secret", AAD).unwrap();
        assert!(matches!(decrypt(&KEY, &blob, b"other-domain"), Err(CryptoError::AeadDecrypt)));
    }
}
