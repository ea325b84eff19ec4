/// Unified error type for all store operations
///
/// Store-level failures are surfaced as-is; translating "referenced id
/// missing" into a domain `NotFound` is the directory's job.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// MongoDB driver errors
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Connection failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Document could not be encoded to BSON
    #[error("BSON encode error: {0}")]
    BsonEncode(#[from] mongodb::bson::ser::Error),

    /// Document could not be decoded from BSON
    #[error("BSON decode error: {0}")]
    BsonDecode(#[from] mongodb::bson::de::Error),

    /// Generic database error
    #[error("Database error: {0}")]
    Generic(String),
}

/// Result type alias for store operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
