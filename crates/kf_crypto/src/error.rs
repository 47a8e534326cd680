use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("AEAD encryption failed")]
    AeadEncrypt,

    #[error("AEAD decryption failed (authentication tag mismatch — possible tampering)")]
    AeadDecrypt,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Stored hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Invalid or expired token")]
    TokenInvalid,

    #[error("Decrypted field is not valid UTF-8")]
    FieldEncoding,

    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}
