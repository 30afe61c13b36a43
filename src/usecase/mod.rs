pub mod login_usecase;
pub mod register_user_usecase;

use crate::domain::error::DomainError;

/// Run password hashing off the async worker threads
async fn run_blocking<F, R>(task: F) -> Result<R, DomainError>
where
    F: FnOnce() -> Result<R, DomainError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| DomainError::Internal(format!("hashing task failed: {e}")))?
}
