use pbkdf2::pbkdf2_hmac;
use rand_core::{OsRng, TryRngCore};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::{
    error::DomainError,
    models::credential::{CredentialRecord, HASH_LEN, HashedPassword, SALT_LEN},
    services::password_service::{PasswordHasher, VerifyOutcome},
};

/// PBKDF2-HMAC-SHA256 rounds used for every stored record
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salted PBKDF2-HMAC-SHA256 hasher producing `<base64 salt>.<base64 hash>` records.
///
/// Stateless apart from its round count; clones are cheap and can be moved to
/// blocking threads freely.
#[derive(Clone)]
pub struct Pbkdf2PasswordHasher {
    iterations: u32,
}

impl Pbkdf2PasswordHasher {
    pub fn new() -> Self {
        Self {
            iterations: PBKDF2_ITERATIONS,
        }
    }

    /// Cheaper round count for tests that do not check the stored vectors
    #[cfg(test)]
    pub fn with_iterations(iterations: std::num::NonZeroU32) -> Self {
        Self {
            iterations: iterations.get(),
        }
    }

    fn derive(&self, plain_password: &str, salt: &[u8; SALT_LEN]) -> [u8; HASH_LEN] {
        let mut out = [0u8; HASH_LEN];
        pbkdf2_hmac::<Sha256>(plain_password.as_bytes(), salt, self.iterations, &mut out);
        out
    }
}

impl PasswordHasher for Pbkdf2PasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| DomainError::Internal(format!("failed to generate salt: {e}")))?;

        let hash = self.derive(plain_password, &salt);

        Ok(CredentialRecord::new(salt, hash).into())
    }

    fn verify(
        &self,
        plain_password: &str,
        hashed_password: &HashedPassword,
    ) -> Result<VerifyOutcome, DomainError> {
        if hashed_password.is_empty() {
            return Err(DomainError::InvalidArgument("stored record is empty"));
        }

        let record = hashed_password.record()?;
        let derived = self.derive(plain_password, record.salt());

        // fixed-time over the whole hash
        if bool::from(derived.as_slice().ct_eq(record.hash().as_slice())) {
            Ok(VerifyOutcome::Match)
        } else {
            Ok(VerifyOutcome::Mismatch)
        }
    }
}
