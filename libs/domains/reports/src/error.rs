use database::{DatabaseError, MalformedIdentifier};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The reporting user does not exist (checked before the job)
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// The reported job does not exist
    #[error("job not found: {0}")]
    JobNotFound(String),

    #[error("report not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    MalformedId(#[from] MalformedIdentifier),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

pub type ReportResult<T> = Result<T, ReportError>;
