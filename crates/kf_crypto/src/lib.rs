//! kf_crypto — Keyfort cryptographic primitives
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited Rust crates.
//! - Secret plaintext is returned in `Zeroizing` buffers.
//! - Stateless functions only; key material is owned by the caller
//!   (the store's cipher engine, the core's session authority).
//!
//! # Module layout
//! - `aead`     — XChaCha20-Poly1305 encrypt/decrypt (nonce-prefixed blobs)
//! - `password` — Argon2id one-way hashing for passwords / security answers
//! - `token`    — HMAC-SHA256 signed session tokens, 24h validity
//! - `error`    — unified error type

pub mod aead;
pub mod error;
pub mod password;
pub mod token;

pub use error::CryptoError;
