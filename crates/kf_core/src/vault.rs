//! Credential operations over the encrypted store.
//!
//! Thin policy layer: every call is owner-scoped, and `StoreError` is mapped
//! into the [`VaultError`] taxonomy on the way up (integrity faults stay
//! distinct from infrastructure faults).

use tracing::info;

use kf_store::credentials::{self, Credential, CredentialPatch, NewCredential};
use kf_store::Store;

use crate::error::VaultError;

#[derive(Clone)]
pub struct CredentialService {
    store: Store,
}

impl CredentialService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn add(&self, owner: &str, new: NewCredential) -> Result<Credential, VaultError> {
        let created = credentials::insert(&self.store, owner, new).await?;
        info!("[vault] add: owner={} id={}", owner, created.id);
        Ok(created)
    }

    pub async fn list(&self, owner: &str) -> Result<Vec<Credential>, VaultError> {
        Ok(credentials::list_for_owner(&self.store, owner).await?)
    }

    pub async fn search(
        &self,
        owner: &str,
        category: Option<&str>,
        keyword: Option<&str>,
    ) -> Result<Vec<Credential>, VaultError> {
        Ok(credentials::search_for_owner(&self.store, owner, category, keyword).await?)
    }

    /// Apply a partial patch to `(owner, id)`.  A missing or foreign id is a
    /// silent no-op, not an error.
    pub async fn update(
        &self,
        owner: &str,
        id: &str,
        patch: CredentialPatch,
    ) -> Result<(), VaultError> {
        let touched = credentials::update_for_owner(&self.store, owner, id, patch).await?;
        if touched {
            info!("[vault] update: owner={owner} id={id}");
        } else {
            info!("[vault] update: no row for owner={owner} id={id}");
        }
        Ok(())
    }

    /// Delete `(owner, id)`.  Idempotent: a missing or foreign id succeeds.
    pub async fn delete(&self, owner: &str, id: &str) -> Result<(), VaultError> {
        let removed = credentials::delete_for_owner(&self.store, owner, id).await?;
        if removed {
            info!("[vault] delete: owner={owner} id={id}");
        }
        Ok(())
    }
}
