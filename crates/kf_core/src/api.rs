//! Request/response types consumed by the routing layer.
//! These map directly to JSON bodies on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kf_store::credentials::{Credential, CredentialPatch};

// ── Auth surface ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub security_question: String,
    pub security_answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token, valid 24 hours from issuance.
    pub token: String,
    pub username: String,
    /// Echoed so the client can prompt it during password recovery.
    pub security_question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetRequest {
    pub username: String,
    pub security_answer: String,
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyMasterRequest {
    pub master_password: String,
}

// ── Credential surface ───────────────────────────────────────────────────────

/// Body of a create call.  `category`, `account_name`, `username`, and
/// `password` are required; they are `Option` here to model a JSON body with
/// the field missing, which the service rejects.  Empty strings are accepted
/// as valid content.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CredentialCreateRequest {
    pub category: Option<String>,
    pub account_name: Option<String>,
    /// Login username for the stored account (not the owner's username).
    pub username: Option<String>,
    pub password: Option<String>,
    pub mpin: Option<String>,
    pub security_questions: Option<String>,
    pub notes: Option<String>,
}

/// Body of an update call: a partial patch, not a full replace.  `None`
/// leaves a field untouched; for the secret fields an empty string is also
/// a no-op (see [`CredentialPatch`]).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CredentialUpdateRequest {
    pub category: Option<String>,
    pub account_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub mpin: Option<String>,
    pub security_questions: Option<String>,
    pub notes: Option<String>,
}

impl From<CredentialUpdateRequest> for CredentialPatch {
    fn from(req: CredentialUpdateRequest) -> Self {
        CredentialPatch {
            category: req.category,
            account_name: req.account_name,
            username: req.username,
            password: req.password,
            mpin: req.mpin,
            security_questions: req.security_questions,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Exact category match.
    pub category: Option<String>,
    /// Case-insensitive substring over account name, login username, notes.
    pub keyword: Option<String>,
}

/// A credential as returned to its owner: every secret field decrypted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialView {
    pub id: String,
    pub category: String,
    pub account_name: String,
    pub username: String,
    pub password: String,
    pub mpin: Option<String>,
    pub security_questions: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Credential> for CredentialView {
    fn from(c: Credential) -> Self {
        CredentialView {
            id: c.id,
            category: c.category,
            account_name: c.account_name,
            username: c.username,
            password: c.password,
            mpin: c.mpin,
            security_questions: c.security_questions,
            notes: c.notes,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}
