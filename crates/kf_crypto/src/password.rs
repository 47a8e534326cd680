//! One-way hashing for account passwords and security answers
//!
//! Argon2id via the PHC string format: the salt, parameters, and digest all
//! live in the stored string, so verification needs no side-channel state.
//! Every call to [`hash_secret`] draws a fresh random salt, which is how a
//! user's password hash and security-answer hash end up salted independently.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};

use crate::error::CryptoError;

/// Hash a secret (password or security answer) into a PHC string.
pub fn hash_secret(secret: &str) -> Result<String, CryptoError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| CryptoError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a candidate secret against a stored PHC string.
///
/// Mismatch is `Ok(false)`; an error means the stored hash itself is
/// unusable (corrupt or from an unsupported algorithm).
pub fn verify_secret(secret: &str, stored: &str) -> Result<bool, CryptoError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| CryptoError::MalformedHash(e.to_string()))?;
    match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(CryptoError::MalformedHash(e.to_string())),
    }
}
