use tracing::info;

use crate::{
    domain::{
        error::{DomainError, RepositoryError},
        models::user::Username,
        repositories::credential_repository::CredentialRepository,
        services::{password_service::PasswordHasher, token_service::TokenGenerator},
    },
    usecase::{login_usecase::LoginResult, run_blocking},
};

pub struct RegisterUserUsecase<C: CredentialRepository, P: PasswordHasher, T: TokenGenerator> {
    credential_repository: C,
    password_hasher: P,
    token_generator: T,
}

impl<C: CredentialRepository, P: PasswordHasher + 'static, T: TokenGenerator>
    RegisterUserUsecase<C, P, T>
{
    pub fn new(credential_repository: C, password_hasher: P, token_generator: T) -> Self {
        Self {
            credential_repository,
            password_hasher,
            token_generator,
        }
    }

    pub async fn register(
        &self,
        username: String,
        password: String,
    ) -> Result<LoginResult, DomainError> {
        let username = Username::new(&username)?;
        if password.is_empty() {
            return Err(DomainError::InvalidCredentials);
        }

        // Hash password
        let hasher = self.password_hasher.clone();
        let password_hash = run_blocking(move || hasher.hash(&password)).await?;

        let credential = self
            .credential_repository
            .register(&username, password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::AlreadyExists => DomainError::UsernameTaken,
                other => other.into(),
            })?;

        let user = credential.user();
        let token = self.token_generator.generate(&user)?;
        info!(username = username.as_str(), id = %user.id(), "user registered");

        Ok(LoginResult { token, user })
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use rstest::*;

    use super::*;
    use crate::{
        domain::models::{credential::HashedPassword, user::User},
        infrastructure::{
            credential_repository::InMemoryCredentialRepository,
            pbkdf2_password_hasher::Pbkdf2PasswordHasher,
        },
        usecase::login_usecase::LoginUsecase,
    };

    #[derive(Clone)]
    struct MockTokenGenerator;

    impl TokenGenerator for MockTokenGenerator {
        fn generate(&self, _user: &User) -> Result<String, DomainError> {
            Ok("mock_token".to_string())
        }
    }

    #[fixture]
    fn hasher() -> Pbkdf2PasswordHasher {
        Pbkdf2PasswordHasher::with_iterations(NonZeroU32::new(1_000).unwrap())
    }

    #[rstest]
    #[tokio::test]
    async fn registered_user_can_log_in(hasher: Pbkdf2PasswordHasher) {
        let repo = InMemoryCredentialRepository::new();
        let register = RegisterUserUsecase::new(repo.clone(), hasher.clone(), MockTokenGenerator);
        let login = LoginUsecase::new(repo.clone(), hasher.clone(), MockTokenGenerator);

        let registered = register
            .register("NewUser".to_string(), "secret".to_string())
            .await
            .unwrap();
        assert_eq!(registered.token, "mock_token");

        let logged_in = login
            .login("newuser".to_string(), "secret".to_string())
            .await
            .unwrap();
        assert_eq!(logged_in.user.id(), registered.user.id());
        assert_eq!(logged_in.user.username().as_str(), "NewUser");

        let stored = repo
            .lookup(&Username::new("newuser").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password_hash(), &HashedPassword::new("secret".to_string()));
        assert!(hasher.matches("secret", stored.password_hash()));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_username_is_taken(hasher: Pbkdf2PasswordHasher) {
        let register =
            RegisterUserUsecase::new(InMemoryCredentialRepository::new(), hasher, MockTokenGenerator);
        register
            .register("user1".to_string(), "first".to_string())
            .await
            .unwrap();

        let result = register
            .register("USER1".to_string(), "second".to_string())
            .await;
        assert!(matches!(result, Err(DomainError::UsernameTaken)));
    }

    #[rstest]
    #[case("", "secret")]
    #[case("  ", "secret")]
    #[case("user1", "")]
    #[tokio::test]
    async fn register_requires_both_fields(
        hasher: Pbkdf2PasswordHasher,
        #[case] name: &str,
        #[case] password: &str,
    ) {
        let register =
            RegisterUserUsecase::new(InMemoryCredentialRepository::new(), hasher, MockTokenGenerator);
        let result = register.register(name.to_string(), password.to_string()).await;
        assert!(matches!(result, Err(DomainError::InvalidCredentials)));
    }
}
