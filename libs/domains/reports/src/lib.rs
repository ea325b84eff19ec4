//! Reports Domain
//!
//! User-submitted reports on job postings. Creation checks both foreign
//! references (user first, then job) against the owning directories through
//! the [`repository::ReferenceDirectory`] seam; after creation no invariant
//! is maintained - a referenced user or job may later be deleted, leaving a
//! dangling report.

pub mod error;
pub mod models;
pub mod mongo_repository_impl;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ReportError, ReportResult};
pub use models::{Report, ReportResponse};
pub use mongo_repository_impl::{MongoReferenceDirectory, MongoReportRepository};
pub use repository::{
    InMemoryReferenceDirectory, InMemoryReportRepository, ReferenceDirectory, ReportRepository,
};
pub use service::ReportService;
