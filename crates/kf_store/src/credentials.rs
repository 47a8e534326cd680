//! Credential-record queries.
//!
//! This is the field-encryption boundary: plaintext comes in through
//! [`NewCredential`] / [`CredentialPatch`] and is encrypted before it
//! touches a row; rows leave as decrypted [`Credential`] values.  Ciphertext
//! never crosses upward and is never substring-matched — the keyword filter
//! in [`search_for_owner`] runs over decrypted values only.
//!
//! Every query is scoped by `user_id`.  An id that exists under a different
//! owner behaves exactly like an id that does not exist at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{db::Store, error::StoreError, models::CredentialRow};

/// Plaintext input for a new credential.  `category`, `account_name`,
/// `username`, and `password` are structurally required; empty strings are
/// legal content.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub category: String,
    pub account_name: String,
    pub username: String,
    pub password: String,
    pub mpin: Option<String>,
    pub security_questions: Option<String>,
    pub notes: Option<String>,
}

/// Partial update.  `None` leaves a field untouched.
///
/// For the secret fields (`password`, `mpin`, `security_questions`,
/// `notes`), `Some("")` is also a no-op: there is no supported path to
/// clear a secret field once set.  Known limitation, kept on purpose.
#[derive(Debug, Clone, Default)]
pub struct CredentialPatch {
    pub category: Option<String>,
    pub account_name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub mpin: Option<String>,
    pub security_questions: Option<String>,
    pub notes: Option<String>,
}

/// A credential as the owner sees it: every secret field decrypted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
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

/// Encrypt and persist a new credential for `owner`.
pub async fn insert(
    store: &Store,
    owner: &str,
    new: NewCredential,
) -> Result<Credential, StoreError> {
    let now = Utc::now();
    let id = Uuid::new_v4().to_string();

    let password_enc = store.encrypt_field(&new.password)?;
    let mpin_enc = encrypt_opt(store, new.mpin.as_deref())?;
    let security_questions_enc = encrypt_opt(store, new.security_questions.as_deref())?;
    let notes_enc = encrypt_opt(store, new.notes.as_deref())?;

    sqlx::query(
        "INSERT INTO credentials (id, user_id, category, account_name, username, password_enc, mpin_enc, security_questions_enc, notes_enc, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(owner)
    .bind(&new.category)
    .bind(&new.account_name)
    .bind(&new.username)
    .bind(&password_enc)
    .bind(&mpin_enc)
    .bind(&security_questions_enc)
    .bind(&notes_enc)
    .bind(now)
    .bind(now)
    .execute(&store.pool)
    .await?;

    Ok(Credential {
        id,
        category: new.category,
        account_name: new.account_name,
        username: new.username,
        password: new.password,
        mpin: new.mpin,
        security_questions: new.security_questions,
        notes: new.notes,
        created_at: now,
        updated_at: now,
    })
}

/// All of `owner`'s credentials, decrypted.
///
/// A single undecryptable row aborts the whole call: corrupted ciphertext is
/// an integrity fault, and partial results would hide it.
pub async fn list_for_owner(store: &Store, owner: &str) -> Result<Vec<Credential>, StoreError> {
    let rows = sqlx::query_as::<_, CredentialRow>(
        "SELECT * FROM credentials WHERE user_id = ? ORDER BY created_at, id",
    )
    .bind(owner)
    .fetch_all(&store.pool)
    .await?;

    rows.into_iter().map(|r| decrypt_row(store, r)).collect()
}

/// Filtered view of `owner`'s credentials.
///
/// `category` is an exact match, applied in SQL.  `keyword` is a
/// case-insensitive substring match over account name, login username, and
/// notes — applied after decryption, since notes live encrypted at rest.
/// Both filters compose with AND.
pub async fn search_for_owner(
    store: &Store,
    owner: &str,
    category: Option<&str>,
    keyword: Option<&str>,
) -> Result<Vec<Credential>, StoreError> {
    let rows = match category {
        Some(cat) => {
            sqlx::query_as::<_, CredentialRow>(
                "SELECT * FROM credentials WHERE user_id = ? AND category = ? ORDER BY created_at, id",
            )
            .bind(owner)
            .bind(cat)
            .fetch_all(&store.pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, CredentialRow>(
                "SELECT * FROM credentials WHERE user_id = ? ORDER BY created_at, id",
            )
            .bind(owner)
            .fetch_all(&store.pool)
            .await?
        }
    };

    let decrypted: Vec<Credential> = rows
        .into_iter()
        .map(|r| decrypt_row(store, r))
        .collect::<Result<_, _>>()?;

    let Some(keyword) = keyword else {
        return Ok(decrypted);
    };
    let needle = keyword.to_lowercase();

    Ok(decrypted
        .into_iter()
        .filter(|c| {
            c.account_name.to_lowercase().contains(&needle)
                || c.username.to_lowercase().contains(&needle)
                || c
                    .notes
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
        })
        .collect())
}

/// Apply a partial update to `(owner, id)`.  Returns `false` without
/// touching anything when the row is missing or belongs to someone else —
/// a silent no-op, not an error.
pub async fn update_for_owner(
    store: &Store,
    owner: &str,
    id: &str,
    patch: CredentialPatch,
) -> Result<bool, StoreError> {
    let Some(row) = sqlx::query_as::<_, CredentialRow>(
        "SELECT * FROM credentials WHERE id = ? AND user_id = ?",
    )
    .bind(id)
    .bind(owner)
    .fetch_optional(&store.pool)
    .await?
    else {
        return Ok(false);
    };

    let category = patch.category.unwrap_or(row.category);
    let account_name = patch.account_name.unwrap_or(row.account_name);
    let username = patch.username.unwrap_or(row.username);

    let password_enc = match patch.password {
        Some(p) if !p.is_empty() => store.encrypt_field(&p)?,
        _ => row.password_enc,
    };
    let mpin_enc = patch_secret(store, patch.mpin, row.mpin_enc)?;
    let security_questions_enc =
        patch_secret(store, patch.security_questions, row.security_questions_enc)?;
    let notes_enc = patch_secret(store, patch.notes, row.notes_enc)?;

    sqlx::query(
        "UPDATE credentials SET category = ?, account_name = ?, username = ?, password_enc = ?, mpin_enc = ?, security_questions_enc = ?, notes_enc = ?, updated_at = ? \
         WHERE id = ? AND user_id = ?",
    )
    .bind(&category)
    .bind(&account_name)
    .bind(&username)
    .bind(&password_enc)
    .bind(&mpin_enc)
    .bind(&security_questions_enc)
    .bind(&notes_enc)
    .bind(Utc::now())
    .bind(id)
    .bind(owner)
    .execute(&store.pool)
    .await?;

    Ok(true)
}

/// Delete `(owner, id)`.  Deleting a missing or foreign id is success
/// (idempotent); the return value only reports whether a row went away.
pub async fn delete_for_owner(store: &Store, owner: &str, id: &str) -> Result<bool, StoreError> {
    let result = sqlx::query("DELETE FROM credentials WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(owner)
        .execute(&store.pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn encrypt_opt(store: &Store, value: Option<&str>) -> Result<Option<String>, StoreError> {
    value.map(|v| store.encrypt_field(v)).transpose()
}

/// Merge one secret field of a patch: a non-empty new value re-encrypts,
/// an empty or absent one keeps the stored blob as-is.
fn patch_secret(
    store: &Store,
    new_value: Option<String>,
    current_enc: Option<String>,
) -> Result<Option<String>, StoreError> {
    match new_value {
        Some(v) if !v.is_empty() => Ok(Some(store.encrypt_field(&v)?)),
        _ => Ok(current_enc),
    }
}

fn decrypt_row(store: &Store, row: CredentialRow) -> Result<Credential, StoreError> {
    Ok(Credential {
        id: row.id,
        category: row.category,
        account_name: row.account_name,
        username: row.username,
        password: store.decrypt_field(&row.password_enc)?,
        mpin: decrypt_opt(store, row.mpin_enc.as_deref())?,
        security_questions: decrypt_opt(store, row.security_questions_enc.as_deref())?,
        notes: decrypt_opt(store, row.notes_enc.as_deref())?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn decrypt_opt(store: &Store, blob: Option<&str>) -> Result<Option<String>, StoreError> {
    blob.map(|b| store.decrypt_field(b)).transpose()
}
