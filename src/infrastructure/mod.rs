pub mod credential_repository;
pub mod jwt_token_generator;
pub mod pbkdf2_password_hasher;
