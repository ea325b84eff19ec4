//! Persistence layer for the job-board core.
//!
//! This crate owns everything that touches the document store directly:
//!
//! - `mongo` - connection management (one handle per process, established at
//!   startup and injected into the directories)
//! - `store` - [`RecordStore`], generic per-collection CRUD primitives plus
//!   the approximate nearest-neighbor query used by semantic job search
//! - `ids` - parsing of caller-supplied identifiers into the store's
//!   internal `ObjectId` form
//!
//! The directory crates (`domain_accounts`, `domain_jobs`, `domain_reports`)
//! build their repositories on top of these primitives and never hold a raw
//! client themselves.
//!
//! # Examples
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::{MongoConfig, RecordStore, mongo};
//!
//! let config = MongoConfig::from_env()?;
//! let client = mongo::connect_from_config(&config).await?;
//! let store = RecordStore::new(&client, config.database());
//! ```

pub mod common;
pub mod ids;
pub mod mongo;
pub mod store;

pub use common::{DatabaseError, DatabaseResult};
pub use ids::{MalformedIdentifier, parse_oid};
pub use mongo::MongoConfig;
pub use store::RecordStore;
