use tracing::{error, info};

use crate::{
    domain::{
        error::DomainError,
        models::{
            credential::{CredentialRecord, HASH_LEN, HashedPassword, SALT_LEN},
            user::{User, Username},
        },
        repositories::credential_repository::CredentialRepository,
        services::{
            password_service::{PasswordHasher, VerifyOutcome},
            token_service::{Token, TokenGenerator},
        },
    },
    usecase::run_blocking,
};

#[derive(Debug)]
pub struct LoginResult {
    pub token: Token,
    pub user: User,
}

pub struct LoginUsecase<C: CredentialRepository, P: PasswordHasher, T: TokenGenerator> {
    credential_repository: C,
    password_hasher: P,
    token_generator: T,
    // checked for unknown users so they cost the same as known ones
    decoy_hash: HashedPassword,
}

impl<C: CredentialRepository, P: PasswordHasher + 'static, T: TokenGenerator> LoginUsecase<C, P, T> {
    pub fn new(credential_repository: C, password_hasher: P, token_generator: T) -> Self {
        Self {
            credential_repository,
            password_hasher,
            token_generator,
            decoy_hash: CredentialRecord::new([0; SALT_LEN], [0; HASH_LEN]).into(),
        }
    }

    /// Check `password` against the stored record for `username`.
    ///
    /// Unknown users, wrong passwords and unusable stored records all end in
    /// [`DomainError::AuthenticationFailed`].
    pub async fn login(&self, username: String, password: String) -> Result<LoginResult, DomainError> {
        let username = Username::new(&username)?;
        if password.is_empty() {
            return Err(DomainError::InvalidCredentials);
        }

        let hasher = self.password_hasher.clone();
        let Some(credential) = self.credential_repository.lookup(&username).await? else {
            let decoy = self.decoy_hash.clone();
            run_blocking(move || Ok(hasher.matches(&password, &decoy))).await?;
            info!(username = username.as_str(), "login rejected: unknown user");
            return Err(DomainError::AuthenticationFailed);
        };

        let stored = credential.password_hash().clone();
        match run_blocking(move || hasher.verify(&password, &stored)).await {
            Ok(VerifyOutcome::Match) => {}
            Ok(VerifyOutcome::Mismatch) => {
                info!(username = username.as_str(), "login rejected: wrong password");
                return Err(DomainError::AuthenticationFailed);
            }
            Err(e @ (DomainError::MalformedRecord(_) | DomainError::InvalidArgument(_))) => {
                error!(username = username.as_str(), error = %e, "stored credential is unusable");
                return Err(DomainError::AuthenticationFailed);
            }
            Err(e) => return Err(e),
        }

        let user = credential.user();
        let token = self.token_generator.generate(&user)?;
        info!(username = username.as_str(), id = %user.id(), "login succeeded");

        Ok(LoginResult { token, user })
    }
}
