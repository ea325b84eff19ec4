//! Mongo-backed implementations of the report persistence and reference
//! seams over the generic record store.

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};

use database::RecordStore;
use domain_accounts::models::USERS_COLLECTION;
use domain_jobs::models::JOBS_COLLECTION;

use crate::error::ReportResult;
use crate::models::{REPORTS_COLLECTION, Report};
use crate::repository::{ReferenceDirectory, ReportRepository};

#[derive(Clone)]
pub struct MongoReportRepository {
    store: RecordStore,
}

impl MongoReportRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReportRepository for MongoReportRepository {
    async fn insert(&self, report: Report) -> ReportResult<ObjectId> {
        let id = self.store.insert(REPORTS_COLLECTION, &report).await?;
        tracing::info!(report_id = %id, user_id = %report.user_id, "Created report");
        Ok(id)
    }

    async fn list_all(&self) -> ReportResult<Vec<Report>> {
        Ok(self.store.fetch_all(REPORTS_COLLECTION).await?)
    }

    async fn delete(&self, id: ObjectId) -> ReportResult<bool> {
        let deleted = self
            .store
            .delete_one(REPORTS_COLLECTION, doc! { "_id": id })
            .await?;
        if deleted > 0 {
            tracing::info!(report_id = %id, "Deleted report");
        }
        Ok(deleted > 0)
    }
}

/// Existence checks against the `users` and `jobs` collections
#[derive(Clone)]
pub struct MongoReferenceDirectory {
    store: RecordStore,
}

impl MongoReferenceDirectory {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReferenceDirectory for MongoReferenceDirectory {
    async fn user_exists(&self, id: ObjectId) -> ReportResult<bool> {
        Ok(self.store.exists_by_id(USERS_COLLECTION, id).await?)
    }

    async fn job_exists(&self, id: ObjectId) -> ReportResult<bool> {
        Ok(self.store.exists_by_id(JOBS_COLLECTION, id).await?)
    }
}
