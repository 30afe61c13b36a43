use crate::domain::{error::DomainError, models::credential::HashedPassword};

/// Result of checking a candidate password against a well-formed record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Match,
    Mismatch,
}

impl VerifyOutcome {
    pub fn is_match(self) -> bool {
        self == VerifyOutcome::Match
    }
}

/// Service for hashing and verifying passwords
pub trait PasswordHasher: Clone + Send + Sync {
    /// Hash a plain text password into a new stored record
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError>;

    /// Verify a plain text password against a stored record.
    ///
    /// A record that cannot be parsed is reported as
    /// [`DomainError::MalformedRecord`], never as a match.
    fn verify(
        &self,
        plain_password: &str,
        hashed_password: &HashedPassword,
    ) -> Result<VerifyOutcome, DomainError>;

    /// `true` only for a confirmed match; every error counts as `false`
    fn matches(&self, plain_password: &str, hashed_password: &HashedPassword) -> bool {
        self.verify(plain_password, hashed_password)
            .is_ok_and(VerifyOutcome::is_match)
    }
}
