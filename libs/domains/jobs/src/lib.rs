//! Jobs Domain
//!
//! Job-posting lifecycle plus the two matching paths: word-overlap filtering
//! against a user's stored preference, and semantic search over embedding
//! vectors kept in sync with the posting text.
//!
//! The embedding pipeline lives in [`embedding`]: an OpenAI-backed provider
//! behind a mockable trait, wrapped in a generator that absorbs rate limits
//! with bounded backoff and degrades to a sentinel vector instead of failing.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐
//! │   Service   │ ──► │  Embedding   │  ← provider + backoff + sentinel
//! └──────┬──────┘     └──────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← data access (trait + Mongo / in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entities, DTOs
//! └─────────────┘
//! ```

pub mod embedding;
pub mod error;
pub mod models;
pub mod mongo_repository_impl;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use embedding::{BackoffPolicy, EmbeddingGenerator, EmbeddingProvider, OpenAIProvider};
pub use error::{JobError, JobResult};
pub use models::{CreateJob, Job, JobResponse, UpdateJob};
pub use mongo_repository_impl::MongoJobRepository;
pub use repository::{InMemoryJobRepository, JobRepository};
pub use service::JobService;
