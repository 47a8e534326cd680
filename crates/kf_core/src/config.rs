//! Startup configuration.
//!
//! Read once at process start; the decoded master key and the token signing
//! secret are handed to the cipher engine and the session authority by
//! construction.  Nothing below this layer reads the environment.

use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const ENV_MASTER_KEY: &str = "KEYFORT_MASTER_KEY";
pub const ENV_TOKEN_SECRET: &str = "KEYFORT_TOKEN_SECRET";
pub const ENV_DB_PATH: &str = "KEYFORT_DB_PATH";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("KEYFORT_MASTER_KEY must be 64 hex characters (a 32-byte key)")]
    BadMasterKey,
}

pub struct VaultConfig {
    /// Static field-encryption key.  No runtime rotation.
    pub master_key: [u8; 32],
    /// HMAC secret for session tokens.
    pub token_secret: String,
    pub db_path: PathBuf,
}

impl VaultConfig {
    pub fn new(
        master_key: [u8; 32],
        token_secret: impl Into<String>,
        db_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            master_key,
            token_secret: token_secret.into(),
            db_path: db_path.into(),
        }
    }

    /// Load configuration from the `KEYFORT_*` environment variables.
    /// The master key is hex-encoded, exactly 32 bytes.
    pub fn from_env() -> Result<Self, ConfigError> {
        let key_hex = env::var(ENV_MASTER_KEY).map_err(|_| ConfigError::Missing(ENV_MASTER_KEY))?;
        let key_bytes = hex::decode(key_hex.trim()).map_err(|_| ConfigError::BadMasterKey)?;
        let master_key: [u8; 32] = key_bytes
            .try_into()
            .map_err(|_| ConfigError::BadMasterKey)?;

        let token_secret =
            env::var(ENV_TOKEN_SECRET).map_err(|_| ConfigError::Missing(ENV_TOKEN_SECRET))?;
        let db_path = env::var(ENV_DB_PATH).map_err(|_| ConfigError::Missing(ENV_DB_PATH))?;

        Ok(Self::new(master_key, token_secret, PathBuf::from(db_path)))
    }
}

impl std::fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material and the signing secret must never reach logs.
        f.debug_struct("VaultConfig")
            .field("master_key", &"..")
            .field("token_secret", &"..")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_hex_key() {
        let bytes = hex::decode("deadbeef").unwrap();
        let result: Result<[u8; 32], _> = bytes.try_into();
        assert!(result.is_err());
    }

    #[test]
    fn debug_never_prints_secrets() {
        let config = VaultConfig::new([1u8; 32], "signing-secret", "/tmp/kf.db");
        let printed = format!("{config:?}");
        assert!(!printed.contains("signing-secret"));
        assert!(!printed.contains('1'));
    }
}
