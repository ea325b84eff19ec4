use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

use database::parse_oid;
use domain_accounts::models::{PREFERENCE_ANY, Preference};

use crate::embedding::EmbeddingGenerator;
use crate::error::{JobError, JobResult};
use crate::models::{CreateJob, DATE_FORMAT, Job, JobResponse, UpdateJob};
use crate::repository::JobRepository;

/// Over-fetch factor for the similarity index's candidate pool
const CANDIDATE_FACTOR: u32 = 3;

/// Service layer for job-posting business logic
///
/// Owns the invariant that a stored embedding always reflects the posting's
/// current text fields: every create and every update recomputes the vector
/// before the write lands.
pub struct JobService<R: JobRepository> {
    repository: Arc<R>,
    embedder: Arc<EmbeddingGenerator>,
}

impl<R: JobRepository> JobService<R> {
    pub fn new(repository: R, embedder: EmbeddingGenerator) -> Self {
        Self {
            repository: Arc::new(repository),
            embedder: Arc::new(embedder),
        }
    }

    /// Create a job posting.
    pub async fn add_job(&self, input: CreateJob) -> JobResult<JobResponse> {
        require_field("company", &input.company)?;
        require_field("job_description", &input.job_description)?;
        require_field("job_type", &input.job_type)?;
        require_field("location", &input.location)?;
        require_field("date", &input.date)?;
        require_field("link", &input.link)?;

        let mut job = Job {
            id: None,
            company: input.company,
            job_description: input.job_description,
            job_type: input.job_type,
            location: input.location,
            date: parse_date(&input.date)?,
            link: input.link,
            embedding_vector: Vec::new(),
        };
        job.embedding_vector = self.embedder.embed(&job.embedding_text()).await;

        let id = self.repository.insert(job.clone()).await?;
        job.id = Some(id);
        Ok(job.into())
    }

    /// Apply a partial update to a posting.
    ///
    /// The embedding is regenerated from the merged document even when no
    /// semantic field changed; an update always costs one embedding
    /// computation. Two concurrent updates of the same id race at the field
    /// level, last write wins.
    pub async fn update_job(&self, id: &str, changes: UpdateJob) -> JobResult<JobResponse> {
        let oid = parse_oid(id)?;
        let mut job = self
            .repository
            .find_by_id(oid)
            .await?
            .ok_or_else(|| JobError::NotFound(id.to_string()))?;

        if let Some(company) = changes.company {
            job.company = company;
        }
        if let Some(job_description) = changes.job_description {
            job.job_description = job_description;
        }
        if let Some(job_type) = changes.job_type {
            job.job_type = job_type;
        }
        if let Some(location) = changes.location {
            job.location = location;
        }
        if let Some(ref date) = changes.date {
            job.date = parse_date(date)?;
        }
        if let Some(link) = changes.link {
            job.link = link;
        }

        job.embedding_vector = self.embedder.embed(&job.embedding_text()).await;
        self.repository.update(&job).await?;
        Ok(job.into())
    }

    /// Delete a posting.
    pub async fn delete_job(&self, id: &str) -> JobResult<()> {
        let oid = parse_oid(id)?;
        if !self.repository.delete(oid).await? {
            return Err(JobError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Purge every posting dated strictly before the cutoff.
    ///
    /// A full-collection scan with one delete per stale row; intended for
    /// administrative use, not the request path. Returns the purge count.
    pub async fn delete_jobs_before(&self, cutoff: &str) -> JobResult<usize> {
        let cutoff = parse_date(cutoff)?;
        let mut purged = 0;
        for job in self.repository.list_all().await? {
            if job.date < cutoff {
                if let Some(id) = job.id {
                    if self.repository.delete(id).await? {
                        purged += 1;
                    }
                }
            }
        }
        tracing::info!(purged, cutoff = %cutoff.format(DATE_FORMAT), "Purged stale jobs");
        Ok(purged)
    }

    /// The `n` most recent postings, newest first.
    pub async fn most_recent(&self, n: i64) -> JobResult<Vec<JobResponse>> {
        let jobs = self.repository.most_recent(n).await?;
        Ok(jobs.into_iter().map(Into::into).collect())
    }

    /// Postings matching a user's stored preference.
    ///
    /// Each job is checked once against both rules, so a job can never
    /// appear twice in the result.
    pub async fn jobs_by_preference(&self, preference: &Preference) -> JobResult<Vec<JobResponse>> {
        let jobs = self.repository.list_all().await?;
        Ok(jobs
            .into_iter()
            .filter(|job| matches_preference(job, preference))
            .map(Into::into)
            .collect())
    }

    /// Semantic search: embed the query text and rank postings by vector
    /// similarity.
    pub async fn search_by_vector(&self, text: &str, limit: u32) -> JobResult<Vec<JobResponse>> {
        let query = self.embedder.embed(text).await;
        let jobs = self
            .repository
            .nearest(&query, limit, limit.saturating_mul(CANDIDATE_FACTOR))
            .await?;
        Ok(jobs.into_iter().map(Into::into).collect())
    }

    /// Maintenance sweep: recompute every posting's embedding from its
    /// current fields. Returns the number of rows rewritten.
    pub async fn reembed_all(&self) -> JobResult<usize> {
        let mut rewritten = 0;
        for mut job in self.repository.list_all().await? {
            job.embedding_vector = self.embedder.embed(&job.embedding_text()).await;
            if self.repository.update(&job).await? {
                rewritten += 1;
            }
        }
        tracing::info!(rewritten, "Re-embedded job collection");
        Ok(rewritten)
    }
}

fn require_field(name: &'static str, value: &str) -> JobResult<()> {
    if value.trim().is_empty() {
        return Err(JobError::MissingField(name));
    }
    Ok(())
}

fn parse_date(raw: &str) -> JobResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| JobError::InvalidDate(raw.to_string()))?;
    Ok(date.and_time(chrono::NaiveTime::MIN).and_utc())
}

/// One preference field against one job field: `"any"` matches everything,
/// otherwise the words (split on `separator`, case-insensitive) must overlap.
fn field_matches(preferred: &str, actual: &str, separator: char) -> bool {
    if preferred.eq_ignore_ascii_case(PREFERENCE_ANY) {
        return true;
    }
    let wanted: Vec<String> = split_words(preferred, separator);
    split_words(actual, separator)
        .iter()
        .any(|word| wanted.contains(word))
}

fn split_words(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(|word| word.trim().to_lowercase())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Location words are comma-separated, job-type words space-separated; a job
/// matches only when both rules hold.
pub(crate) fn matches_preference(job: &Job, preference: &Preference) -> bool {
    field_matches(&preference.location, &job.location, ',')
        && field_matches(&preference.job_type, &job.job_type, ' ')
}
