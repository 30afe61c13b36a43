mod config;
mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::AppConfig,
    domain::{
        repositories::credential_repository::CredentialRepository,
        services::{password_service::PasswordHasher, token_service::TokenGenerator},
    },
    infrastructure::{
        credential_repository::InMemoryCredentialRepository,
        jwt_token_generator::JwtTokenGenerator, pbkdf2_password_hasher::Pbkdf2PasswordHasher,
    },
    presentation::handlers::user_handler::create_user_router,
    usecase::{login_usecase::LoginUsecase, register_user_usecase::RegisterUserUsecase},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    let credential_repository = InMemoryCredentialRepository::new();
    let password_hasher = Pbkdf2PasswordHasher::new();
    let token_generator =
        JwtTokenGenerator::with_expiration(config.jwt_secret.clone(), config.token_expiration_hours);

    let app = build_app(credential_repository, password_hasher, token_generator);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

/// Wire the use cases onto one shared store and build the HTTP app
fn build_app<C, P, T>(credential_repository: C, password_hasher: P, token_generator: T) -> Router
where
    C: CredentialRepository + Clone + 'static,
    P: PasswordHasher + 'static,
    T: TokenGenerator + 'static,
{
    let login_service = LoginUsecase::new(
        credential_repository.clone(),
        password_hasher.clone(),
        token_generator.clone(),
    );
    let register_user_usecase =
        RegisterUserUsecase::new(credential_repository, password_hasher, token_generator);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest(
            "/api",
            create_user_router(login_service, register_user_usecase),
        )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
