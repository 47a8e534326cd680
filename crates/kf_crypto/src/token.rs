//! Stateless session tokens
//!
//! Wire format: `base64url(claims JSON) . base64url(HMAC-SHA256 tag)`
//! where the tag covers the encoded claims segment. Claims carry only the
//! owner id plus issue/expiry timestamps; nothing is persisted server-side
//! and there is no revocation list, so a token stays valid for its full
//! window.
//!
//! `issue_at` / `verify_at` take the clock explicitly; callers that want
//! wall-clock behaviour pass `Utc::now()`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// Validity window of a session token.
pub const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Owner id the token asserts.
    sub: String,
    iat: i64,
    exp: i64,
}

/// Mint a token for `owner_id`, valid for [`SESSION_TTL_HOURS`] from `now`.
pub fn issue_at(secret: &[u8], owner_id: &str, now: DateTime<Utc>) -> String {
    let claims = Claims {
        sub: owner_id.to_owned(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
    };
    let claims_json =
        serde_json::to_vec(&claims).expect("plain string/int claims always serialise");
    let payload = URL_SAFE_NO_PAD.encode(claims_json);
    let tag = mac(secret, payload.as_bytes()).finalize().into_bytes();
    format!("{payload}.{}", URL_SAFE_NO_PAD.encode(tag))
}

/// Verify a token against `secret` at time `now` and return the owner id.
///
/// Signature mismatch, malformed structure, undecodable claims, and expiry
/// all collapse to [`CryptoError::TokenInvalid`]; the caller cannot tell a
/// forged token from an expired one.
pub fn verify_at(
    secret: &[u8],
    token: &str,
    now: DateTime<Utc>,
) -> Result<String, CryptoError> {
    let (payload, tag) = token.split_once('.').ok_or(CryptoError::TokenInvalid)?;
    let tag_bytes = URL_SAFE_NO_PAD
        .decode(tag)
        .map_err(|_| CryptoError::TokenInvalid)?;

    // Constant-time tag comparison, before the claims are even parsed.
    mac(secret, payload.as_bytes())
        .verify_slice(&tag_bytes)
        .map_err(|_| CryptoError::TokenInvalid)?;

    let claims_json = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| CryptoError::TokenInvalid)?;
    let claims: Claims =
        serde_json::from_slice(&claims_json).map_err(|_| CryptoError::TokenInvalid)?;

    if now.timestamp() >= claims.exp {
        return Err(CryptoError::TokenInvalid);
    }
    Ok(claims.sub)
}

fn mac(secret: &[u8], data: &[u8]) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC-SHA256 accepts any key length");
    mac.update(data);
    mac
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-signing-secret";

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn issue_then_verify_returns_owner_id() {
        let token = issue_at(SECRET, "owner-123", t0());
        let sub = verify_at(SECRET, &token, t0()).unwrap();
        assert_eq!(sub, "owner-123");
    }

    #[test]
    fn accepted_just_before_expiry_rejected_just_after() {
        let token = issue_at(SECRET, "owner-123", t0());

        let almost = t0() + Duration::hours(23) + Duration::minutes(59);
        assert_eq!(verify_at(SECRET, &token, almost).unwrap(), "owner-123");

        let past = t0() + Duration::hours(24) + Duration::minutes(1);
        assert!(matches!(
            verify_at(SECRET, &token, past),
            Err(CryptoError::TokenInvalid)
        ));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_at(SECRET, "owner-123", t0());
        assert!(matches!(
            verify_at(b"other-secret", &token, t0()),
            Err(CryptoError::TokenInvalid)
        ));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let token = issue_at(SECRET, "owner-123", t0());
        let (payload, tag) = token.split_once('.').unwrap();
        let forged_claims = URL_SAFE_NO_PAD.encode(
            br#"{"sub":"someone-else","iat":1700000000,"exp":9999999999}"#,
        );
        let forged = format!("{forged_claims}.{tag}");
        assert_ne!(payload, forged_claims);
        assert!(matches!(
            verify_at(SECRET, &forged, t0()),
            Err(CryptoError::TokenInvalid)
        ));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        for garbage in ["", "no-dot", "a.b.c", "!!!.???", "onlypayload."] {
            assert!(
                matches!(verify_at(SECRET, garbage, t0()), Err(CryptoError::TokenInvalid)),
                "accepted garbage token {garbage:?}"
            );
        }
    }
}
