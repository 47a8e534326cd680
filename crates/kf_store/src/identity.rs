//! Identity-record queries.  Pure SQL + row mapping; hashing policy lives in
//! the service layer, which hands this module finished PHC strings.

use chrono::Utc;
use uuid::Uuid;

use crate::{db::Store, error::StoreError, models::UserRow};

/// Insert a new user.  The caller has already checked for duplicates; the
/// UNIQUE constraint still backstops a race between check and insert.
pub async fn insert_user(
    store: &Store,
    username: &str,
    password_hash: &str,
    security_question: &str,
    security_answer_hash: &str,
) -> Result<UserRow, StoreError> {
    let now = Utc::now();
    let row = UserRow {
        id: Uuid::new_v4().to_string(),
        username: username.to_owned(),
        password_hash: password_hash.to_owned(),
        security_question: security_question.to_owned(),
        security_answer_hash: security_answer_hash.to_owned(),
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        "INSERT INTO users (id, username, password_hash, security_question, security_answer_hash, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&row.id)
    .bind(&row.username)
    .bind(&row.password_hash)
    .bind(&row.security_question)
    .bind(&row.security_answer_hash)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(&store.pool)
    .await?;

    Ok(row)
}

/// Case-sensitive username lookup.
pub async fn find_by_username(
    store: &Store,
    username: &str,
) -> Result<Option<UserRow>, StoreError> {
    let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(&store.pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id(store: &Store, id: &str) -> Result<Option<UserRow>, StoreError> {
    let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(&store.pool)
        .await?;
    Ok(row)
}

/// Swap in a new password hash (the reset path).  The security-answer hash
/// is never touched here.
pub async fn update_password_hash(
    store: &Store,
    user_id: &str,
    new_password_hash: &str,
) -> Result<(), StoreError> {
    sqlx::query("UPDATE users SET password_hash = ?, updated_at = ? WHERE id = ?")
        .bind(new_password_hash)
        .bind(Utc::now())
        .bind(user_id)
        .execute(&store.pool)
        .await?;
    Ok(())
}
