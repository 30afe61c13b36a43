use std::sync::Arc;

use crate::{
    domain::{
        error::DomainError,
        models::user::User,
        repositories::credential_repository::CredentialRepository,
        services::{password_service::PasswordHasher, token_service::TokenGenerator},
    },
    usecase::{
        login_usecase::{LoginResult, LoginUsecase},
        register_user_usecase::RegisterUserUsecase,
    },
};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

// Request

/// json for login and register requests
#[derive(Serialize, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

// Response

/// json for login and register responses
#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

#[derive(Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().as_str().to_string(),
        }
    }
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            token: result.token,
            user: result.user.into(),
        }
    }
}

/* Router Function and Handler Function */

// User Router

/// function return Router object
/// Suppose to be nested by main router
pub fn create_user_router<C, P, T>(
    login_service: LoginUsecase<C, P, T>,
    register_service: RegisterUserUsecase<C, P, T>,
) -> Router
where
    C: CredentialRepository + 'static,
    P: PasswordHasher + 'static,
    T: TokenGenerator + 'static,
{
    let state = AppState {
        login_service: Arc::new(login_service),
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/login", post(login::<C, P, T>))
        .route("/register", post(register::<C, P, T>))
        .with_state(state)
}

pub struct AppState<C: CredentialRepository, P: PasswordHasher, T: TokenGenerator> {
    pub login_service: Arc<LoginUsecase<C, P, T>>,
    pub register_service: Arc<RegisterUserUsecase<C, P, T>>,
}

impl<C: CredentialRepository, P: PasswordHasher, T: TokenGenerator> Clone for AppState<C, P, T> {
    fn clone(&self) -> Self {
        Self {
            login_service: Arc::clone(&self.login_service),
            register_service: Arc::clone(&self.register_service),
        }
    }
}

// handler function

/// handler function for login
async fn login<C, P, T>(
    State(state): State<AppState<C, P, T>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Response
where
    C: CredentialRepository + 'static,
    P: PasswordHasher + 'static,
    T: TokenGenerator + 'static,
{
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match state
        .login_service
        .login(payload.username, payload.password)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(LoginResponse::from(result))).into_response(),
        Err(e) => error_response(e),
    }
}

/// handler function for register
async fn register<C, P, T>(
    State(state): State<AppState<C, P, T>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Response
where
    C: CredentialRepository + 'static,
    P: PasswordHasher + 'static,
    T: TokenGenerator + 'static,
{
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    match state
        .register_service
        .register(payload.username, payload.password)
        .await
    {
        Ok(result) => (StatusCode::CREATED, Json(LoginResponse::from(result))).into_response(),
        Err(e) => error_response(e),
    }
}

/// map a domain error onto a status code and a message safe to show a client
fn error_response(err: DomainError) -> Response {
    let (status, message) = match err {
        DomainError::InvalidCredentials => (
            StatusCode::BAD_REQUEST,
            "Please enter both username and password",
        ),
        DomainError::AuthenticationFailed => {
            (StatusCode::UNAUTHORIZED, "Invalid username or password")
        }
        DomainError::UsernameTaken => (StatusCode::CONFLICT, "Username already exists"),
        other => {
            error!(error = %other, "request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    };

    json_error(status, message)
}

/// unreadable bodies are answered like any other invalid input
fn rejection_response(rejection: JsonRejection) -> Response {
    debug!(reason = %rejection.body_text(), "rejected request body");
    json_error(
        StatusCode::BAD_REQUEST,
        "Request body must be JSON with username and password",
    )
}

fn json_error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}
