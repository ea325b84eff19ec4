//! Mongo-backed implementation of [`JobRepository`] over the generic record
//! store; vector search runs through the store's `$vectorSearch` primitive.

use async_trait::async_trait;
use mongodb::bson::{DateTime, doc, oid::ObjectId};

use database::RecordStore;

use crate::error::JobResult;
use crate::models::{EMBEDDING_INDEX, EMBEDDING_PATH, JOBS_COLLECTION, Job};
use crate::repository::JobRepository;

#[derive(Clone)]
pub struct MongoJobRepository {
    store: RecordStore,
}

impl MongoJobRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl JobRepository for MongoJobRepository {
    async fn insert(&self, job: Job) -> JobResult<ObjectId> {
        let id = self.store.insert(JOBS_COLLECTION, &job).await?;
        tracing::info!(job_id = %id, company = %job.company, "Created job");
        Ok(id)
    }

    async fn find_by_id(&self, id: ObjectId) -> JobResult<Option<Job>> {
        Ok(self
            .store
            .fetch_one(JOBS_COLLECTION, doc! { "_id": id })
            .await?)
    }

    async fn list_all(&self) -> JobResult<Vec<Job>> {
        Ok(self.store.fetch_all(JOBS_COLLECTION).await?)
    }

    async fn most_recent(&self, limit: i64) -> JobResult<Vec<Job>> {
        Ok(self
            .store
            .fetch_ordered(JOBS_COLLECTION, "date", limit)
            .await?)
    }

    async fn update(&self, job: &Job) -> JobResult<bool> {
        let Some(id) = job.id else {
            return Ok(false);
        };
        let fields = doc! {
            "company": &job.company,
            "job_description": &job.job_description,
            "job_type": &job.job_type,
            "location": &job.location,
            "date": DateTime::from_chrono(job.date),
            "link": &job.link,
            "embedding_vector": job.embedding_vector.clone(),
        };
        let matched = self
            .store
            .update_doc(JOBS_COLLECTION, doc! { "_id": id }, fields)
            .await?;
        Ok(matched > 0)
    }

    async fn delete(&self, id: ObjectId) -> JobResult<bool> {
        let deleted = self
            .store
            .delete_one(JOBS_COLLECTION, doc! { "_id": id })
            .await?;
        if deleted > 0 {
            tracing::info!(job_id = %id, "Deleted job");
        }
        Ok(deleted > 0)
    }

    async fn nearest(
        &self,
        query: &[f32],
        limit: u32,
        num_candidates: u32,
    ) -> JobResult<Vec<Job>> {
        Ok(self
            .store
            .nearest(
                JOBS_COLLECTION,
                EMBEDDING_INDEX,
                EMBEDDING_PATH,
                query,
                limit,
                num_candidates,
            )
            .await?)
    }
}
