//! MongoDB connection management
//!
//! One handle is established at process start and shared by every directory;
//! a failed connection is fatal, there is no reconnect loop.

mod config;
mod connector;

pub use config::MongoConfig;
pub use connector::{connect, connect_from_config};

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
