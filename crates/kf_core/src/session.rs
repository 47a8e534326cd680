//! Session authority: stateless, time-bounded proof of an owner identity.
//!
//! Tokens carry only the owner id and are verified purely against the
//! signing secret and the clock — there is no revocation list, so a token
//! stays valid for its full 24-hour window even after a password reset.
//! A known staleness window, kept by design.

use chrono::Utc;

use kf_crypto::token;

use crate::error::VaultError;

pub struct SessionAuthority {
    secret: Vec<u8>,
}

impl SessionAuthority {
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Mint a bearer token for `owner_id`, valid 24 hours from now.
    pub fn issue(&self, owner_id: &str) -> String {
        token::issue_at(&self.secret, owner_id, Utc::now())
    }

    /// Verify a bearer token and return the owner id it asserts.
    ///
    /// Forged, malformed, and expired tokens all fail with the same
    /// [`VaultError::InvalidToken`].
    pub fn verify(&self, bearer: &str) -> Result<String, VaultError> {
        token::verify_at(&self.secret, bearer, Utc::now()).map_err(|_| VaultError::InvalidToken)
    }
}

impl std::fmt::Debug for SessionAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionAuthority(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_returns_owner_id() {
        let authority = SessionAuthority::new("secret");
        let bearer = authority.issue("owner-1");
        assert_eq!(authority.verify(&bearer).unwrap(), "owner-1");
    }

    #[test]
    fn foreign_and_garbage_tokens_are_rejected_identically() {
        let authority = SessionAuthority::new("secret");
        let foreign = SessionAuthority::new("other-secret").issue("owner-1");

        let a = authority.verify(&foreign).unwrap_err();
        let b = authority.verify("not-a-token").unwrap_err();
        assert!(matches!(a, VaultError::InvalidToken));
        assert!(matches!(b, VaultError::InvalidToken));
        // Same externally visible message for both failure causes.
        assert_eq!(a.to_string(), b.to_string());
    }
}
