//! kf_core — Keyfort service layer
//!
//! The boundary consumed by the (external) HTTP routing layer: wires the
//! session authority, the identity flows, and the credential operations over
//! `kf_store`, and exposes the closed [`VaultError`] taxonomy.
//!
//! # Module layout
//! - `api`     — request/response types (JSON bodies on the wire)
//! - `config`  — startup configuration, read once
//! - `session` — stateless bearer-token authority, 24h validity
//! - `auth`    — register / login / security-answer reset / reveal gate
//! - `vault`   — credential add / list / search / update / delete
//! - `service` — the [`VaultService`] façade
//! - `error`   — [`VaultError`]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod service;
pub mod session;
pub mod vault;

pub use config::VaultConfig;
pub use error::VaultError;
pub use service::VaultService;
