use database::{DatabaseError, MalformedIdentifier};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("account not found: {0}")]
    NotFound(String),

    #[error("username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("an account with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    MalformedId(#[from] MalformedIdentifier),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("password hashing error: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type AccountResult<T> = Result<T, AccountError>;
