use async_trait::async_trait;

/// Failure modes of one embedding attempt.
///
/// `RateLimited` is kept separate from every other failure: it is the only
/// case the generator retries.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("rate limited by the embedding service")]
    RateLimited,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("embedding service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response shape: {0}")]
    Malformed(String),
}

/// Trait for embedding generation providers
///
/// Implementations call an external embedding service once per invocation;
/// retry policy lives in the generator, not here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}
