//! Accounts Domain
//!
//! User and admin account lifecycle: creation with username/email uniqueness,
//! credential verification (argon2 hashes, never plaintext), profile updates,
//! and job-preference storage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← business rules, hashing, uniqueness, NotFound surfacing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← data access (trait + Mongo / in-memory implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← entities, DTOs
//! └─────────────┘
//! ```

pub mod error;
pub mod models;
pub mod mongo_repository_impl;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{AccountError, AccountResult};
pub use models::{AccountResponse, Admin, Preference, UpdateAccount, User};
pub use mongo_repository_impl::MongoAccountRepository;
pub use repository::{AccountRepository, InMemoryAccountRepository};
pub use service::AccountService;
