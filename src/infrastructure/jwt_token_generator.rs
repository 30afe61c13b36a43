use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    models::user::User,
    services::token_service::{Token, TokenGenerator},
};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,  // Subject (user ID)
    name: String, // Username
    exp: i64,     // Expiration time
    iat: i64,     // Issued at
}

#[derive(Clone)]
pub struct JwtTokenGenerator {
    secret: String,
    expiration_hours: i64,
}

impl JwtTokenGenerator {
    pub fn with_expiration(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret,
            expiration_hours,
        }
    }
}

impl TokenGenerator for JwtTokenGenerator {
    fn generate(&self, user: &User) -> Result<Token, DomainError> {
        let now = Utc::now();
        let exp = Duration::try_hours(self.expiration_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                DomainError::Internal(format!(
                    "token lifetime of {} hours is out of range",
                    self.expiration_hours
                ))
            })?;

        let claims = Claims {
            sub: user.id().to_string(),
            name: user.username().as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| DomainError::Internal(format!("Failed to generate token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{DecodingKey, Validation, decode};
    use uuid::Uuid;

    use super::*;
    use crate::domain::models::user::{UserId, Username};

    #[test]
    fn token_carries_user_claims() {
        let generator = JwtTokenGenerator::with_expiration("secret".to_string(), 2);
        let user = User::new(UserId::from_uuid(Uuid::new_v4()), Username::new("user3").unwrap());

        let token = generator.generate(&user).unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.sub, user.id().to_string());
        assert_eq!(decoded.claims.name, "user3");
        assert_eq!(decoded.claims.exp - decoded.claims.iat, 2 * 3600);
    }

    #[test]
    fn overflowing_lifetime_is_an_error() {
        let user = User::new(UserId::from_uuid(Uuid::new_v4()), Username::new("user3").unwrap());

        for hours in [10_000_000_000, i64::MAX] {
            let generator = JwtTokenGenerator::with_expiration("secret".to_string(), hours);
            assert!(matches!(
                generator.generate(&user),
                Err(DomainError::Internal(_))
            ));
        }
    }

    #[test]
    fn token_rejects_other_secret() {
        let generator = JwtTokenGenerator::with_expiration("secret".to_string(), 1);
        let user = User::new(UserId::from_uuid(Uuid::new_v4()), Username::new("user1").unwrap());

        let token = generator.generate(&user).unwrap();
        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other"),
            &Validation::default(),
        );
        assert!(decoded.is_err());
    }
}
