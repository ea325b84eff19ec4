//! Embedding generation for job postings.
//!
//! A mockable [`EmbeddingProvider`] trait with an OpenAI-backed
//! implementation, wrapped by [`EmbeddingGenerator`], which owns the
//! degraded-mode contract: rate limits are retried with bounded backoff, and
//! every other failure (including a missing credential) produces the
//! sentinel vector instead of an error. Job ingestion stays available when
//! the embedding service is down; affected rows are detectable via
//! [`is_sentinel`].

mod generator;
mod openai;
mod provider;

pub use generator::{
    BackoffPolicy, EMBEDDING_DIM, EmbeddingGenerator, SENTINEL_VALUE, is_sentinel,
};
pub use openai::{DEFAULT_EMBEDDING_MODEL, OpenAIConfig, OpenAIProvider};
pub use provider::{EmbeddingError, EmbeddingProvider};

#[cfg(test)]
pub use provider::MockEmbeddingProvider;
