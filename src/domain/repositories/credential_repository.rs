use async_trait::async_trait;

use crate::domain::{
    error::RepositoryError,
    models::{
        credential::{Credential, HashedPassword},
        user::Username,
    },
};

/// Store of registered accounts, injected by the caller
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// Store a new account; fails with `AlreadyExists` when the username is taken
    async fn register(
        &self,
        username: &Username,
        password_hash: HashedPassword,
    ) -> Result<Credential, RepositoryError>;

    async fn lookup(&self, username: &Username) -> Result<Option<Credential>, RepositoryError>;
}
