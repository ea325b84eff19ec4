use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Collection holding job documents
pub const JOBS_COLLECTION: &str = "jobs";

/// Atlas search index covering the embedding field
pub const EMBEDDING_INDEX: &str = "jobs_embedding_index";

/// Document field the similarity index runs over
pub const EMBEDDING_PATH: &str = "embedding_vector";

/// Calendar-date wire format for posting dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Job posting as stored in the `jobs` collection
///
/// `embedding_vector` is always present after creation and is regenerated on
/// every update so it never drifts from the text fields it summarizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub company: String,
    pub job_description: String,
    pub job_type: String,
    pub location: String,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
    pub link: String,
    pub embedding_vector: Vec<f32>,
}

impl Job {
    /// Canonical text the embedding summarizes.
    ///
    /// The field order (company, location, type, ISO date, description) is
    /// contractual: changing it would make new embeddings incomparable with
    /// rows already stored.
    pub fn embedding_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.company,
            self.location,
            self.job_type,
            self.date.format(DATE_FORMAT),
            self.job_description,
        )
    }
}

/// Input for creating a job posting; every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJob {
    pub company: String,
    pub job_description: String,
    pub job_type: String,
    pub location: String,
    /// Calendar date in `YYYY-MM-DD` form
    pub date: String,
    pub link: String,
}

/// Optional-field changes for a job update; unset fields are untouched.
///
/// Even an update that changes nothing costs one embedding computation: the
/// vector is regenerated from the merged document unconditionally.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateJob {
    pub company: Option<String>,
    pub job_description: Option<String>,
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub link: Option<String>,
}

/// Job DTO handed back to callers: id stringified as `job_id`, embedding
/// never exposed.
#[derive(Debug, Clone, Serialize)]
pub struct JobResponse {
    pub job_id: String,
    pub company: String,
    pub job_description: String,
    pub job_type: String,
    pub location: String,
    pub date: String,
    pub link: String,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            job_id: job.id.map(|id| id.to_hex()).unwrap_or_default(),
            company: job.company,
            job_description: job.job_description,
            job_type: job.job_type,
            location: job.location,
            date: job.date.format(DATE_FORMAT).to_string(),
            link: job.link,
        }
    }
}
