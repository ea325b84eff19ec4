//! Generic per-collection CRUD primitives over the document store.
//!
//! Every operation here is a single document-level request; there are no
//! cross-document transactions. Entity semantics (uniqueness, referential
//! checks, "not found" surfacing) live in the directory crates - this layer
//! only moves documents.

use futures::stream::TryStreamExt;
use mongodb::bson::{Document, doc, from_document, oid::ObjectId};
use mongodb::{Client, Database};
use serde::{Serialize, de::DeserializeOwned};

use crate::common::{DatabaseError, DatabaseResult};

/// Handle to one named database, shared by every directory.
///
/// Cloning is cheap (the underlying client is pooled) and the handle is
/// never mutated after construction.
#[derive(Clone)]
pub struct RecordStore {
    db: Database,
}

impl RecordStore {
    pub fn new(client: &Client, db_name: &str) -> Self {
        Self {
            db: client.database(db_name),
        }
    }

    /// Access the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Insert a single document and return its generated id.
    pub async fn insert<T>(&self, collection: &str, doc: &T) -> DatabaseResult<ObjectId>
    where
        T: Serialize + Send + Sync,
    {
        let result = self.db.collection::<T>(collection).insert_one(doc).await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            DatabaseError::Generic(format!("non-ObjectId key inserted into '{collection}'"))
        })
    }

    /// Find with a filter and return the first document found, if any.
    pub async fn fetch_one<T>(&self, collection: &str, filter: Document) -> DatabaseResult<Option<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        Ok(self.db.collection::<T>(collection).find_one(filter).await?)
    }

    /// Return every document in a collection.
    pub async fn fetch_all<T>(&self, collection: &str) -> DatabaseResult<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let cursor = self.db.collection::<T>(collection).find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Return up to `limit` documents, descending by `sort_key`.
    pub async fn fetch_ordered<T>(
        &self,
        collection: &str,
        sort_key: &str,
        limit: i64,
    ) -> DatabaseResult<Vec<T>>
    where
        T: DeserializeOwned + Send + Sync,
    {
        let cursor = self
            .db
            .collection::<T>(collection)
            .find(doc! {})
            .sort(doc! { sort_key: -1 })
            .limit(limit)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Check whether a document with the given id exists.
    pub async fn exists_by_id(&self, collection: &str, id: ObjectId) -> DatabaseResult<bool> {
        let count = self
            .db
            .collection::<Document>(collection)
            .count_documents(doc! { "_id": id })
            .await?;
        Ok(count != 0)
    }

    /// Delete the first document matching the filter.
    ///
    /// Deleting something already absent is benign here (returns 0); whether
    /// that is an error is the caller's decision.
    pub async fn delete_one(&self, collection: &str, filter: Document) -> DatabaseResult<u64> {
        let result = self
            .db
            .collection::<Document>(collection)
            .delete_one(filter)
            .await?;
        Ok(result.deleted_count)
    }

    /// Merge `fields` into the first document matching the filter (`$set`);
    /// unspecified fields are untouched. Returns the matched count.
    pub async fn update_doc(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> DatabaseResult<u64> {
        let result = self
            .db
            .collection::<Document>(collection)
            .update_one(filter, doc! { "$set": fields })
            .await?;
        Ok(result.matched_count)
    }

    /// Approximate nearest-neighbor query over a named vector field.
    ///
    /// `num_candidates` sizes the candidate pool the similarity index
    /// considers before trimming to `limit` results.
    pub async fn nearest<T>(
        &self,
        collection: &str,
        index: &str,
        path: &str,
        query: &[f32],
        limit: u32,
        num_candidates: u32,
    ) -> DatabaseResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let pipeline = vec![doc! {
            "$vectorSearch": {
                "index": index,
                "path": path,
                "queryVector": query.to_vec(),
                "numCandidates": num_candidates as i64,
                "limit": limit as i64,
            }
        }];

        let mut cursor = self
            .db
            .collection::<Document>(collection)
            .aggregate(pipeline)
            .await?;

        let mut results = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            results.push(from_document(document)?);
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Pet {
        #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
        id: Option<ObjectId>,
        name: String,
        age: i32,
    }

    async fn test_store() -> RecordStore {
        let url = std::env::var("MONGO_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = crate::mongo::connect(&url).await.unwrap();
        let store = RecordStore::new(&client, "record_store_test");
        store.db.drop().await.unwrap();
        store
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_insert_and_fetch_roundtrip() {
        let store = test_store().await;

        let pet = Pet {
            id: None,
            name: "Rex".to_string(),
            age: 3,
        };
        let id = store.insert("pets", &pet).await.unwrap();

        let fetched: Pet = store
            .fetch_one("pets", doc! { "_id": id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.name, "Rex");
        assert_eq!(fetched.id, Some(id));

        assert!(store.exists_by_id("pets", id).await.unwrap());
        assert!(!store.exists_by_id("pets", ObjectId::new()).await.unwrap());
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_fetch_ordered_descending() {
        let store = test_store().await;

        for age in [1, 5, 3] {
            let pet = Pet {
                id: None,
                name: format!("pet-{age}"),
                age,
            };
            store.insert("ordered_pets", &pet).await.unwrap();
        }

        let pets: Vec<Pet> = store.fetch_ordered("ordered_pets", "age", 2).await.unwrap();
        let ages: Vec<i32> = pets.iter().map(|p| p.age).collect();
        assert_eq!(ages, vec![5, 3]);
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_update_doc_merges_fields() {
        let store = test_store().await;

        let pet = Pet {
            id: None,
            name: "Milo".to_string(),
            age: 2,
        };
        let id = store.insert("update_pets", &pet).await.unwrap();

        let matched = store
            .update_doc("update_pets", doc! { "_id": id }, doc! { "age": 4 })
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let fetched: Pet = store
            .fetch_one("update_pets", doc! { "_id": id })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.age, 4);
        assert_eq!(fetched.name, "Milo"); // untouched

        let matched = store
            .update_doc(
                "update_pets",
                doc! { "_id": ObjectId::new() },
                doc! { "age": 9 },
            )
            .await
            .unwrap();
        assert_eq!(matched, 0);
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_delete_one_is_benign_when_absent() {
        let store = test_store().await;

        let pet = Pet {
            id: None,
            name: "Ghost".to_string(),
            age: 7,
        };
        let id = store.insert("delete_pets", &pet).await.unwrap();

        assert_eq!(
            store
                .delete_one("delete_pets", doc! { "_id": id })
                .await
                .unwrap(),
            1
        );
        // Second delete of the same id: benign, zero deleted.
        assert_eq!(
            store
                .delete_one("delete_pets", doc! { "_id": id })
                .await
                .unwrap(),
            0
        );
    }
}
