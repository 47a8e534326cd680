//! kf_store — Encrypted credential storage for Keyfort
//!
//! # Encryption strategy
//! SQLite does NOT natively encrypt.  We use application-level encryption:
//! - Secret columns (credential password, mpin, security questions, notes)
//!   are stored as XChaCha20-Poly1305 ciphertext, base64-encoded.
//! - Searchable metadata (category, account name, login username) is stored
//!   in plaintext; it is the query surface and is never secret.
//! - The cipher engine is constructed once at startup from configuration and
//!   injected into the store; nothing below this crate reads key material
//!   from the environment.
//!
//! Plaintext crosses this crate's boundary in exactly two directions:
//! encrypt-on-write in `credentials::insert` / `update_for_owner`, and
//! decrypt-on-read in `credentials::list_for_owner` / `search_for_owner`.
//! A decryption failure is a hard integrity error, never "field absent".
//!
//! # Migration
//! SQLx migrations in `migrations/` are run on first open.

pub mod cipher;
pub mod credentials;
pub mod db;
pub mod error;
pub mod identity;
pub mod models;

pub use cipher::CipherEngine;
pub use db::Store;
pub use error::StoreError;
