//! Database row models — these map to/from SQL rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    /// Case-sensitive, unique, non-empty.
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Stored plaintext; echoed back at login so the client can prompt.
    pub security_question: String,
    /// Argon2id PHC string.  Salted independently of `password_hash`.
    pub security_answer_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CredentialRow {
    pub id: String,
    /// Owning user.  Immutable after creation; every query is scoped by it.
    pub user_id: String,
    pub category: String,
    pub account_name: String,
    /// Login username for the stored account (not the owner's username).
    pub username: String,
    /// Encrypted blob (base64 nonce||ciphertext).
    pub password_enc: String,
    /// Optional secret fields: NULL when never set, encrypted blob otherwise.
    pub mpin_enc: Option<String>,
    pub security_questions_enc: Option<String>,
    pub notes_enc: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
