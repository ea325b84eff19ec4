use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ReportResult;
use crate::models::Report;

/// Repository trait for report persistence
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Insert a new report and return its generated id
    async fn insert(&self, report: Report) -> ReportResult<ObjectId>;

    /// Return every report, unfiltered
    async fn list_all(&self) -> ReportResult<Vec<Report>>;

    /// Delete a report by id; returns false when already absent
    async fn delete(&self, id: ObjectId) -> ReportResult<bool>;
}

/// Existence checks against the directories a report references.
///
/// A seam rather than a direct dependency so the report service never
/// reaches into foreign collections, and tests can script both answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceDirectory: Send + Sync {
    async fn user_exists(&self, id: ObjectId) -> ReportResult<bool>;
    async fn job_exists(&self, id: ObjectId) -> ReportResult<bool>;
}

/// In-memory implementation of ReportRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryReportRepository {
    reports: Arc<RwLock<HashMap<ObjectId, Report>>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn insert(&self, mut report: Report) -> ReportResult<ObjectId> {
        let mut reports = self.reports.write().await;
        let id = ObjectId::new();
        report.id = Some(id);

        tracing::info!(report_id = %id, user_id = %report.user_id, "Created report");
        reports.insert(id, report);
        Ok(id)
    }

    async fn list_all(&self) -> ReportResult<Vec<Report>> {
        let reports = self.reports.read().await;
        Ok(reports.values().cloned().collect())
    }

    async fn delete(&self, id: ObjectId) -> ReportResult<bool> {
        let mut reports = self.reports.write().await;
        let removed = reports.remove(&id).is_some();
        if removed {
            tracing::info!(report_id = %id, "Deleted report");
        }
        Ok(removed)
    }
}

/// In-memory reference directory seeded with known ids (for testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryReferenceDirectory {
    users: Arc<RwLock<HashSet<ObjectId>>>,
    jobs: Arc<RwLock<HashSet<ObjectId>>>,
}

impl InMemoryReferenceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_user(&self, id: ObjectId) {
        self.users.write().await.insert(id);
    }

    pub async fn add_job(&self, id: ObjectId) {
        self.jobs.write().await.insert(id);
    }
}

#[async_trait]
impl ReferenceDirectory for InMemoryReferenceDirectory {
    async fn user_exists(&self, id: ObjectId) -> ReportResult<bool> {
        Ok(self.users.read().await.contains(&id))
    }

    async fn job_exists(&self, id: ObjectId) -> ReportResult<bool> {
        Ok(self.jobs.read().await.contains(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_list_delete_roundtrip() {
        let repo = InMemoryReportRepository::new();
        let id = repo
            .insert(Report::new(ObjectId::new(), ObjectId::new(), "Garbage"))
            .await
            .unwrap();

        assert_eq!(repo.list_all().await.unwrap().len(), 1);
        assert!(repo.delete(id).await.unwrap());
        assert!(!repo.delete(id).await.unwrap());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reference_directory_membership() {
        let refs = InMemoryReferenceDirectory::new();
        let user = ObjectId::new();
        refs.add_user(user).await;

        assert!(refs.user_exists(user).await.unwrap());
        assert!(!refs.user_exists(ObjectId::new()).await.unwrap());
        assert!(!refs.job_exists(user).await.unwrap());
    }
}
