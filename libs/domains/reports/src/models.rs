use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Collection holding report documents
pub const REPORTS_COLLECTION: &str = "user_reports";

/// Report entity as stored in the `user_reports` collection
///
/// Both references must exist at creation time; nothing re-checks them
/// afterwards. Reports are never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub job_id: ObjectId,
    pub data: ReportData,
}

/// Free-text payload, nested to match the stored document shape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub report: String,
}

impl Report {
    pub fn new(user_id: ObjectId, job_id: ObjectId, report: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id,
            job_id,
            data: ReportData {
                report: report.into(),
            },
        }
    }
}

/// Report DTO handed back to callers, all ids stringified.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub report_id: String,
    pub user_id: String,
    pub job_id: String,
    pub report: String,
}

impl From<Report> for ReportResponse {
    fn from(report: Report) -> Self {
        Self {
            report_id: report.id.map(|id| id.to_hex()).unwrap_or_default(),
            user_id: report.user_id.to_hex(),
            job_id: report.job_id.to_hex(),
            report: report.data.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_stringifies_every_id() {
        let user_id = ObjectId::new();
        let job_id = ObjectId::new();
        let mut report = Report::new(user_id, job_id, "Garbage");
        let id = ObjectId::new();
        report.id = Some(id);

        let response = ReportResponse::from(report);
        assert_eq!(response.report_id, id.to_hex());
        assert_eq!(response.user_id, user_id.to_hex());
        assert_eq!(response.job_id, job_id.to_hex());
        assert_eq!(response.report, "Garbage");
    }
}
