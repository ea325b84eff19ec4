use database::{DatabaseError, MalformedIdentifier};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("job not found: {0}")]
    NotFound(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error(transparent)]
    MalformedId(#[from] MalformedIdentifier),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type JobResult<T> = Result<T, JobError>;
