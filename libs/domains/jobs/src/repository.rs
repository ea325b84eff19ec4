use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::JobResult;
use crate::models::Job;

/// Repository trait for job persistence
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Insert a new job and return its generated id
    async fn insert(&self, job: Job) -> JobResult<ObjectId>;

    /// Get a job by id
    async fn find_by_id(&self, id: ObjectId) -> JobResult<Option<Job>>;

    /// Return every job
    async fn list_all(&self) -> JobResult<Vec<Job>>;

    /// Return up to `limit` jobs, most recent first
    async fn most_recent(&self, limit: i64) -> JobResult<Vec<Job>>;

    /// Write back an updated job; returns false when the id matched nothing
    async fn update(&self, job: &Job) -> JobResult<bool>;

    /// Delete a job by id; returns false when already absent
    async fn delete(&self, id: ObjectId) -> JobResult<bool>;

    /// Return up to `limit` jobs nearest to the query vector, considering a
    /// candidate pool of `num_candidates`
    async fn nearest(&self, query: &[f32], limit: u32, num_candidates: u32)
    -> JobResult<Vec<Job>>;
}

/// In-memory implementation of JobRepository (for development/testing)
///
/// `nearest` ranks by exact cosine similarity over the whole map; the
/// candidate-pool size only matters to the approximate index behind the
/// Mongo implementation.
#[derive(Debug, Default, Clone)]
pub struct InMemoryJobRepository {
    jobs: Arc<RwLock<HashMap<ObjectId, Job>>>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert(&self, mut job: Job) -> JobResult<ObjectId> {
        let mut jobs = self.jobs.write().await;
        let id = ObjectId::new();
        job.id = Some(id);

        tracing::info!(job_id = %id, company = %job.company, "Created job");
        jobs.insert(id, job);
        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId) -> JobResult<Option<Job>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.get(&id).cloned())
    }

    async fn list_all(&self) -> JobResult<Vec<Job>> {
        let jobs = self.jobs.read().await;
        Ok(jobs.values().cloned().collect())
    }

    async fn most_recent(&self, limit: i64) -> JobResult<Vec<Job>> {
        let jobs = self.jobs.read().await;
        let mut result: Vec<Job> = jobs.values().cloned().collect();
        result.sort_by(|a, b| b.date.cmp(&a.date));
        result.truncate(limit.max(0) as usize);
        Ok(result)
    }

    async fn update(&self, job: &Job) -> JobResult<bool> {
        let mut jobs = self.jobs.write().await;
        match job.id.filter(|id| jobs.contains_key(id)) {
            Some(id) => {
                jobs.insert(id, job.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: ObjectId) -> JobResult<bool> {
        let mut jobs = self.jobs.write().await;
        let removed = jobs.remove(&id).is_some();
        if removed {
            tracing::info!(job_id = %id, "Deleted job");
        }
        Ok(removed)
    }

    async fn nearest(
        &self,
        query: &[f32],
        limit: u32,
        _num_candidates: u32,
    ) -> JobResult<Vec<Job>> {
        let jobs = self.jobs.read().await;
        let mut scored: Vec<(f32, Job)> = jobs
            .values()
            .map(|job| (cosine_similarity(query, &job.embedding_vector), job.clone()))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(scored
            .into_iter()
            .take(limit as usize)
            .map(|(_, job)| job)
            .collect())
    }
}
