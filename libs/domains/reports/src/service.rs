use std::sync::Arc;

use database::parse_oid;

use crate::error::{ReportError, ReportResult};
use crate::models::{Report, ReportResponse};
use crate::repository::{ReferenceDirectory, ReportRepository};

/// Service layer for report business logic
pub struct ReportService<R: ReportRepository> {
    repository: Arc<R>,
    references: Arc<dyn ReferenceDirectory>,
}

impl<R: ReportRepository> ReportService<R> {
    pub fn new(repository: R, references: Arc<dyn ReferenceDirectory>) -> Self {
        Self {
            repository: Arc::new(repository),
            references,
        }
    }

    /// Submit a report against a posting.
    ///
    /// The user reference is checked first and short-circuits: when both ids
    /// are missing the caller sees `UserNotFound`, never `JobNotFound`.
    pub async fn add_report(
        &self,
        user_id: &str,
        job_id: &str,
        report_text: &str,
    ) -> ReportResult<ReportResponse> {
        let user_oid = parse_oid(user_id)?;
        let job_oid = parse_oid(job_id)?;

        if !self.references.user_exists(user_oid).await? {
            return Err(ReportError::UserNotFound(user_id.to_string()));
        }
        if !self.references.job_exists(job_oid).await? {
            return Err(ReportError::JobNotFound(job_id.to_string()));
        }

        let mut report = Report::new(user_oid, job_oid, report_text);
        let id = self.repository.insert(report.clone()).await?;
        report.id = Some(id);
        Ok(report.into())
    }

    /// Every report, unfiltered; admin scoping is the calling layer's job.
    pub async fn get_all_reports(&self) -> ReportResult<Vec<ReportResponse>> {
        let reports = self.repository.list_all().await?;
        Ok(reports.into_iter().map(Into::into).collect())
    }

    /// Delete a report.
    pub async fn delete_report(&self, id: &str) -> ReportResult<()> {
        let oid = parse_oid(id)?;
        if !self.repository.delete(oid).await? {
            return Err(ReportError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{
        InMemoryReferenceDirectory, InMemoryReportRepository, MockReferenceDirectory,
    };
    use mongodb::bson::oid::ObjectId;

    async fn seeded() -> (
        ReportService<InMemoryReportRepository>,
        ObjectId,
        ObjectId,
    ) {
        let references = InMemoryReferenceDirectory::new();
        let user_id = ObjectId::new();
        let job_id = ObjectId::new();
        references.add_user(user_id).await;
        references.add_job(job_id).await;

        let service = ReportService::new(InMemoryReportRepository::new(), Arc::new(references));
        (service, user_id, job_id)
    }

    #[tokio::test]
    async fn test_add_and_list_reports() {
        let (service, user_id, job_id) = seeded().await;

        let report = service
            .add_report(&user_id.to_hex(), &job_id.to_hex(), "Garbage")
            .await
            .unwrap();
        assert_eq!(report.user_id, user_id.to_hex());
        assert_eq!(report.report, "Garbage");
        assert!(!report.report_id.is_empty());

        let all = service.get_all_reports().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_user_rejected() {
        let (service, _, job_id) = seeded().await;

        let result = service
            .add_report(&ObjectId::new().to_hex(), &job_id.to_hex(), "x")
            .await;
        assert!(matches!(result, Err(ReportError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_missing_job_rejected() {
        let (service, user_id, _) = seeded().await;

        let result = service
            .add_report(&user_id.to_hex(), &ObjectId::new().to_hex(), "x")
            .await;
        assert!(matches!(result, Err(ReportError::JobNotFound(_))));
    }

    #[tokio::test]
    async fn test_user_check_short_circuits_before_job_check() {
        // Both references missing: the job lookup must never run. The mock
        // has no expectation on job_exists, so a call would panic.
        let mut references = MockReferenceDirectory::new();
        references
            .expect_user_exists()
            .times(1)
            .returning(|_| Ok(false));

        let service =
            ReportService::new(InMemoryReportRepository::new(), Arc::new(references));

        let result = service
            .add_report(&ObjectId::new().to_hex(), &ObjectId::new().to_hex(), "x")
            .await;
        assert!(matches!(result, Err(ReportError::UserNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_report() {
        let (service, user_id, job_id) = seeded().await;
        let report = service
            .add_report(&user_id.to_hex(), &job_id.to_hex(), "Garbage")
            .await
            .unwrap();

        service.delete_report(&report.report_id).await.unwrap();
        assert!(matches!(
            service.delete_report(&report.report_id).await,
            Err(ReportError::NotFound(_))
        ));
        assert!(service.get_all_reports().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_ids_fail_before_lookups() {
        let (service, user_id, _) = seeded().await;

        assert!(matches!(
            service.add_report("garbage", &user_id.to_hex(), "x").await,
            Err(ReportError::MalformedId(_))
        ));
        assert!(matches!(
            service.delete_report("garbage").await,
            Err(ReportError::MalformedId(_))
        ));
    }
}
