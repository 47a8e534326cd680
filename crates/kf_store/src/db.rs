//! Database abstraction over SQLite via sqlx.

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool};

use crate::{cipher::CipherEngine, error::StoreError};

/// Central store handle.  Cheap to clone (pool and cipher key are Arc'd);
/// read-only after construction, so concurrent requests need no locking.
#[derive(Clone)]
pub struct Store {
    pub pool: SqlitePool,
    pub cipher: CipherEngine,
}

impl Store {
    /// Open (or create) the SQLite database at `db_path`.
    /// Runs all pending migrations automatically.
    ///
    /// WAL journal mode and foreign-key enforcement are configured at
    /// connection time here, NOT inside a migration: SQLite forbids changing
    /// `journal_mode` inside a transaction and sqlx wraps every migration in
    /// one.
    pub async fn open(db_path: &Path, cipher: CipherEngine) -> Result<Self, StoreError> {
        let opts = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePool::connect_with(opts).await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        Ok(Self { pool, cipher })
    }

    // ── Helpers ──────────────────────────────────────────────────────────────

    /// Encrypt a plaintext field with the vault key.
    pub fn encrypt_field(&self, plaintext: &str) -> Result<String, StoreError> {
        Ok(self.cipher.encrypt_field(plaintext)?)
    }

    /// Decrypt a vault-encrypted field.
    pub fn decrypt_field(&self, blob: &str) -> Result<String, StoreError> {
        Ok(self.cipher.decrypt_field(blob)?)
    }
}
