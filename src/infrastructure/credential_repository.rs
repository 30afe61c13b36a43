use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    error::RepositoryError,
    models::{
        credential::{Credential, HashedPassword},
        user::Username,
    },
    repositories::credential_repository::CredentialRepository,
};

/// Process-local account store keyed by case-folded username.
///
/// Clones share the same map, so the composition root can hand one instance
/// to every use case.
#[derive(Clone, Default)]
pub struct InMemoryCredentialRepository {
    credentials: Arc<RwLock<HashMap<String, Credential>>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn register(
        &self,
        username: &Username,
        password_hash: HashedPassword,
    ) -> Result<Credential, RepositoryError> {
        let mut credentials = self.credentials.write().await;
        match credentials.entry(username.key()) {
            Entry::Occupied(_) => Err(RepositoryError::AlreadyExists),
            Entry::Vacant(slot) => {
                let credential = Credential::new(Uuid::new_v4(), username.clone(), password_hash);
                debug!(
                    username = credential.username().as_str(),
                    id = %credential.id(),
                    created_at = %credential.created_at(),
                    "credential stored"
                );
                Ok(slot.insert(credential).clone())
            }
        }
    }

    async fn lookup(&self, username: &Username) -> Result<Option<Credential>, RepositoryError> {
        Ok(self.credentials.read().await.get(&username.key()).cloned())
    }
}
