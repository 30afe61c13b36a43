use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Invalid credentials (username and password are required)")]
    InvalidCredentials,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Malformed credential record: {0}")]
    MalformedRecord(#[from] RecordError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Already exists")]
    AlreadyExists,

    // the in-memory store never fails; persistent stores report backend errors here
    #[allow(dead_code)]
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Structural problems with a stored `<salt>.<hash>` record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("missing '.' separator")]
    MissingSeparator,

    #[error("more than one '.' separator")]
    TooManySeparators,

    #[error("empty {0} segment")]
    EmptySegment(Segment),

    #[error("{0} segment is not valid base64")]
    InvalidBase64(Segment),

    #[error("{segment} segment decodes to {actual} bytes, expected {expected}")]
    InvalidLength {
        segment: Segment,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Salt,
    Hash,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Salt => f.write_str("salt"),
            Segment::Hash => f.write_str("hash"),
        }
    }
}
