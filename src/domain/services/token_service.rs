use crate::domain::{error::DomainError, models::user::User};

pub type Token = String;

pub trait TokenGenerator: Clone + Send + Sync {
    fn generate(&self, user: &User) -> Result<Token, DomainError>;
}
