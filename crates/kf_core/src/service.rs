//! The vault façade consumed by the routing layer.
//!
//! Every credential operation derives its owner from the verified bearer
//! token; a client-supplied owner id is never trusted.

use crate::api::{
    CredentialCreateRequest, CredentialUpdateRequest, CredentialView, LoginRequest, LoginResponse,
    RegisterRequest, ResetRequest, SearchQuery, VerifyMasterRequest,
};
use crate::auth::IdentityService;
use crate::config::VaultConfig;
use crate::error::VaultError;
use crate::session::SessionAuthority;
use crate::vault::CredentialService;

use kf_store::credentials::NewCredential;
use kf_store::{CipherEngine, Store};

pub struct VaultService {
    sessions: SessionAuthority,
    identity: IdentityService,
    credentials: CredentialService,
}

impl VaultService {
    /// Wire the services onto an already opened store.
    pub fn new(config: &VaultConfig, store: Store) -> Self {
        Self {
            sessions: SessionAuthority::new(config.token_secret.as_bytes()),
            identity: IdentityService::new(store.clone()),
            credentials: CredentialService::new(store),
        }
    }

    /// Open the database named by `config` and wire the services onto it.
    /// The cipher engine is built here, once, from the configured key.
    pub async fn open(config: &VaultConfig) -> Result<Self, VaultError> {
        let store = Store::open(&config.db_path, CipherEngine::new(config.master_key)).await?;
        Ok(Self::new(config, store))
    }

    // ── Auth surface ─────────────────────────────────────────────────────────

    pub async fn register(&self, req: RegisterRequest) -> Result<(), VaultError> {
        self.identity
            .register(
                &req.username,
                &req.password,
                &req.security_question,
                &req.security_answer,
            )
            .await
    }

    pub async fn login(&self, req: LoginRequest) -> Result<LoginResponse, VaultError> {
        let user = self.identity.authenticate(&req.username, &req.password).await?;
        Ok(LoginResponse {
            token: self.sessions.issue(&user.id),
            username: user.username,
            security_question: user.security_question,
        })
    }

    /// Password recovery via the security answer.  Success/failure only.
    pub async fn reset(&self, req: ResetRequest) -> Result<(), VaultError> {
        self.identity
            .reset_password(&req.username, &req.security_answer, &req.new_password)
            .await
    }

    /// The reveal gate.  Requires a valid session; returns success/failure
    /// only and never echoes the password.
    pub async fn verify_master(
        &self,
        bearer: &str,
        req: VerifyMasterRequest,
    ) -> Result<(), VaultError> {
        let owner = self.sessions.verify(bearer)?;
        self.identity.authorize_reveal(&owner, &req.master_password).await
    }

    // ── Credential surface ───────────────────────────────────────────────────

    pub async fn list(&self, bearer: &str) -> Result<Vec<CredentialView>, VaultError> {
        let owner = self.sessions.verify(bearer)?;
        Ok(self
            .credentials
            .list(&owner)
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    pub async fn create(
        &self,
        bearer: &str,
        req: CredentialCreateRequest,
    ) -> Result<CredentialView, VaultError> {
        let owner = self.sessions.verify(bearer)?;
        let new = NewCredential {
            category: require(req.category, "category is required")?,
            account_name: require(req.account_name, "account name is required")?,
            username: require(req.username, "username is required")?,
            password: require(req.password, "password is required")?,
            mpin: req.mpin,
            security_questions: req.security_questions,
            notes: req.notes,
        };
        Ok(self.credentials.add(&owner, new).await?.into())
    }

    pub async fn update(
        &self,
        bearer: &str,
        id: &str,
        req: CredentialUpdateRequest,
    ) -> Result<(), VaultError> {
        let owner = self.sessions.verify(bearer)?;
        self.credentials.update(&owner, id, req.into()).await
    }

    pub async fn delete(&self, bearer: &str, id: &str) -> Result<(), VaultError> {
        let owner = self.sessions.verify(bearer)?;
        self.credentials.delete(&owner, id).await
    }

    pub async fn search(
        &self,
        bearer: &str,
        query: SearchQuery,
    ) -> Result<Vec<CredentialView>, VaultError> {
        let owner = self.sessions.verify(bearer)?;
        Ok(self
            .credentials
            .search(&owner, query.category.as_deref(), query.keyword.as_deref())
            .await?
            .into_iter()
            .map(Into::into)
            .collect())
    }
}

/// Structural presence check; empty strings are valid field content.
fn require(field: Option<String>, missing: &'static str) -> Result<String, VaultError> {
    field.ok_or(VaultError::Validation(missing))
}
