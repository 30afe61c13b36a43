use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    error::{RecordError, Segment},
    models::user::{User, UserId, Username},
};

/// Separator between the salt and hash segments of a stored record
pub const SEPARATOR: char = '.';
/// Decoded salt length in bytes
pub const SALT_LEN: usize = 16;
/// Decoded derived-key length in bytes
pub const HASH_LEN: usize = 32;

/// Value object representing a stored `<base64 salt>.<base64 hash>` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap an already hashed string
    #[cfg(test)]
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse into salt and hash bytes
    pub fn record(&self) -> Result<CredentialRecord, RecordError> {
        CredentialRecord::parse(&self.0)
    }
}

impl From<CredentialRecord> for HashedPassword {
    fn from(record: CredentialRecord) -> Self {
        Self(record.encode())
    }
}

/// Decoded form of a [`HashedPassword`].
///
/// Both segments use the standard base64 alphabet with padding. A record is
/// well-formed only when it has exactly one separator and both segments decode
/// to their fixed lengths.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    salt: [u8; SALT_LEN],
    hash: [u8; HASH_LEN],
}

impl CredentialRecord {
    pub fn new(salt: [u8; SALT_LEN], hash: [u8; HASH_LEN]) -> Self {
        Self { salt, hash }
    }

    pub fn parse(record: &str) -> Result<Self, RecordError> {
        let (salt, hash) = record
            .split_once(SEPARATOR)
            .ok_or(RecordError::MissingSeparator)?;
        if hash.contains(SEPARATOR) {
            return Err(RecordError::TooManySeparators);
        }

        Ok(Self {
            salt: decode_segment(salt, Segment::Salt)?,
            hash: decode_segment(hash, Segment::Hash)?,
        })
    }

    pub fn encode(&self) -> String {
        format!(
            "{}{}{}",
            STANDARD.encode(self.salt),
            SEPARATOR,
            STANDARD.encode(self.hash)
        )
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    pub fn hash(&self) -> &[u8; HASH_LEN] {
        &self.hash
    }
}

// salt and hash bytes stay out of logs
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord").finish_non_exhaustive()
    }
}

fn decode_segment<const N: usize>(value: &str, segment: Segment) -> Result<[u8; N], RecordError> {
    if value.is_empty() {
        return Err(RecordError::EmptySegment(segment));
    }

    let bytes = STANDARD
        .decode(value)
        .map_err(|_| RecordError::InvalidBase64(segment))?;

    bytes
        .try_into()
        .map_err(|bytes: Vec<u8>| RecordError::InvalidLength {
            segment,
            expected: N,
            actual: bytes.len(),
        })
}

/// Stored account entry
#[derive(Debug, Clone)]
pub struct Credential {
    id: Uuid,
    username: Username,
    password_hash: HashedPassword,
    created_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(id: Uuid, username: Username, password_hash: HashedPassword) -> Self {
        Self {
            id,
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Public view of the account
    pub fn user(&self) -> User {
        User::new(UserId::from_uuid(self.id), self.username.clone())
    }
}
