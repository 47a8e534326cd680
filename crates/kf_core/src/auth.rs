//! Identity flows: register, login, security-answer reset, and the reveal
//! gate that guards disclosure of decrypted secrets.

use tracing::{info, warn};

use kf_crypto::password::{hash_secret, verify_secret};
use kf_store::{identity, Store, StoreError};

use crate::error::VaultError;

/// Identity established by a successful password check at login.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: String,
    pub username: String,
    pub security_question: String,
}

#[derive(Clone)]
pub struct IdentityService {
    store: Store,
}

impl IdentityService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create an account.  All four fields must be non-empty; the password
    /// and the security answer are hashed independently, each with its own
    /// salt.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        security_question: &str,
        security_answer: &str,
    ) -> Result<(), VaultError> {
        if [username, password, security_question, security_answer]
            .iter()
            .any(|f| f.is_empty())
        {
            return Err(VaultError::Validation("all fields are required"));
        }

        if identity::find_by_username(&self.store, username)
            .await?
            .is_some()
        {
            warn!("[auth] register refused, username taken: {username}");
            return Err(VaultError::DuplicateUser);
        }

        let password_hash = hash_secret(password)?;
        let answer_hash = hash_secret(security_answer)?;

        match identity::insert_user(
            &self.store,
            username,
            &password_hash,
            security_question,
            &answer_hash,
        )
        .await
        {
            Ok(row) => {
                info!("[auth] register: user={} id={}", username, row.id);
                Ok(())
            }
            // Lost the race between the duplicate pre-check and the insert.
            Err(StoreError::Database(sqlx::Error::Database(db))) if db.is_unique_violation() => {
                Err(VaultError::DuplicateUser)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check a username/password pair.  Unknown usernames and wrong
    /// passwords fail identically.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, VaultError> {
        let Some(user) = identity::find_by_username(&self.store, username).await? else {
            warn!("[auth] login failed: user={username}");
            return Err(VaultError::InvalidCredentials);
        };
        if !verify_secret(password, &user.password_hash)? {
            warn!("[auth] login failed: user={username}");
            return Err(VaultError::InvalidCredentials);
        }
        info!("[auth] login: user={} id={}", username, user.id);
        Ok(AuthenticatedUser {
            id: user.id,
            username: user.username,
            security_question: user.security_question,
        })
    }

    /// Replace the account password after verifying the security answer.
    ///
    /// This path bypasses the normal password check entirely: the answer
    /// alone is sufficient to take over the account.  An accepted tradeoff
    /// of the recovery design, kept as-is.  Unknown usernames fail the same
    /// way as wrong answers so this unauthenticated path cannot be used to
    /// enumerate accounts.
    pub async fn reset_password(
        &self,
        username: &str,
        security_answer: &str,
        new_password: &str,
    ) -> Result<(), VaultError> {
        if new_password.is_empty() {
            return Err(VaultError::Validation("new password is required"));
        }

        let Some(user) = identity::find_by_username(&self.store, username).await? else {
            warn!("[auth] reset failed: user={username}");
            return Err(VaultError::InvalidSecurityAnswer);
        };
        if !verify_secret(security_answer, &user.security_answer_hash)? {
            warn!("[auth] reset failed: user={username}");
            return Err(VaultError::InvalidSecurityAnswer);
        }

        let new_hash = hash_secret(new_password)?;
        identity::update_password_hash(&self.store, &user.id, &new_hash).await?;
        info!("[auth] reset: user={} id={}", username, user.id);
        Ok(())
    }

    /// The reveal gate: re-run the password check for an already
    /// authenticated owner before decrypted secrets may be shown.
    ///
    /// Stateless and per-request — passing it grants nothing beyond this
    /// call; there is no server-side "unlocked" window, so every
    /// reveal-sensitive operation re-invokes it.
    pub async fn authorize_reveal(
        &self,
        owner_id: &str,
        submitted_password: &str,
    ) -> Result<(), VaultError> {
        if submitted_password.is_empty() {
            return Err(VaultError::Validation("master password is required"));
        }

        let Some(user) = identity::find_by_id(&self.store, owner_id).await? else {
            // Valid session but the user row is gone; same failure as a
            // wrong password.
            warn!("[auth] reveal gate: unknown owner id");
            return Err(VaultError::InvalidCredentials);
        };
        if !verify_secret(submitted_password, &user.password_hash)? {
            warn!("[auth] reveal gate refused: user={}", user.username);
            return Err(VaultError::InvalidCredentials);
        }
        info!("[auth] reveal gate passed: user={}", user.username);
        Ok(())
    }
}
