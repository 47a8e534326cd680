use thiserror::Error;

use kf_crypto::CryptoError;
use kf_store::StoreError;

/// Closed error taxonomy at the vault boundary.
///
/// Authentication and authorization failures deliberately share uniform
/// messages: a caller cannot tell an unknown username from a wrong password,
/// or an expired token from a forged one.  Integrity faults ([`Decryption`])
/// and infrastructure faults ([`StoreUnavailable`]) stay distinct and are
/// never folded into the generic buckets.
///
/// [`Decryption`]: VaultError::Decryption
/// [`StoreUnavailable`]: VaultError::StoreUnavailable
#[derive(Debug, Error)]
pub enum VaultError {
    /// A required field is structurally missing or blank.
    #[error("{0}")]
    Validation(&'static str),

    #[error("username already exists")]
    DuplicateUser,

    /// Uniform for unknown username and wrong password alike.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Uniform for unknown username and wrong answer alike.
    #[error("incorrect security answer")]
    InvalidSecurityAnswer,

    /// Uniform for forged, malformed, and expired tokens alike.
    #[error("invalid or expired session")]
    InvalidToken,

    /// Part of the boundary contract for the transport layer; `update` and
    /// `delete` themselves treat an owner-scoped miss as a silent no-op
    /// instead of returning this.
    #[error("record not found")]
    NotFoundForOwner,

    /// Stored ciphertext (or a stored hash) failed its integrity check.
    /// Never masked as "field absent" or as a generic server error.
    #[error("stored data failed integrity check")]
    Decryption,

    #[error("storage unavailable")]
    StoreUnavailable,
}

impl From<CryptoError> for VaultError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::TokenInvalid => VaultError::InvalidToken,
            CryptoError::AeadDecrypt
            | CryptoError::Base64Decode(_)
            | CryptoError::FieldEncoding
            | CryptoError::MalformedHash(_) => VaultError::Decryption,
            CryptoError::AeadEncrypt | CryptoError::PasswordHash(_) => {
                VaultError::StoreUnavailable
            }
        }
    }
}

impl From<StoreError> for VaultError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Crypto(c) => c.into(),
            StoreError::Database(_) | StoreError::Migration(_) => VaultError::StoreUnavailable,
        }
    }
}
