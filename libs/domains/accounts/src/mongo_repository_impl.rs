//! Mongo-backed implementation of [`AccountRepository`] over the generic
//! record store.

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};

use database::RecordStore;

use crate::error::AccountResult;
use crate::models::{ADMINS_COLLECTION, Admin, Preference, USERS_COLLECTION, User};
use crate::repository::AccountRepository;

#[derive(Clone)]
pub struct MongoAccountRepository {
    store: RecordStore,
}

impl MongoAccountRepository {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AccountRepository for MongoAccountRepository {
    async fn insert_user(&self, user: User) -> AccountResult<ObjectId> {
        let id = self.store.insert(USERS_COLLECTION, &user).await?;
        tracing::info!(user_id = %id, username = %user.username, "Created user");
        Ok(id)
    }

    async fn find_user_by_id(&self, id: ObjectId) -> AccountResult<Option<User>> {
        Ok(self
            .store
            .fetch_one(USERS_COLLECTION, doc! { "_id": id })
            .await?)
    }

    async fn find_user_by_username(&self, username: &str) -> AccountResult<Option<User>> {
        Ok(self
            .store
            .fetch_one(USERS_COLLECTION, doc! { "username": username })
            .await?)
    }

    async fn username_exists(&self, username: &str) -> AccountResult<bool> {
        Ok(self.find_user_by_username(username).await?.is_some())
    }

    async fn email_exists(&self, email: &str) -> AccountResult<bool> {
        let user: Option<User> = self
            .store
            .fetch_one(USERS_COLLECTION, doc! { "email": email })
            .await?;
        Ok(user.is_some())
    }

    async fn update_user(&self, user: &User) -> AccountResult<bool> {
        let Some(id) = user.id else {
            return Ok(false);
        };
        let fields = doc! {
            "username": &user.username,
            "email": &user.email,
            "password_hash": &user.password_hash,
            "preference": {
                "location": &user.preference.location,
                "job_type": &user.preference.job_type,
            },
        };
        let matched = self
            .store
            .update_doc(USERS_COLLECTION, doc! { "_id": id }, fields)
            .await?;
        Ok(matched > 0)
    }

    async fn set_preference(&self, id: ObjectId, preference: &Preference) -> AccountResult<bool> {
        let fields = doc! {
            "preference": {
                "location": &preference.location,
                "job_type": &preference.job_type,
            },
        };
        let matched = self
            .store
            .update_doc(USERS_COLLECTION, doc! { "_id": id }, fields)
            .await?;
        Ok(matched > 0)
    }

    async fn delete_user(&self, id: ObjectId) -> AccountResult<bool> {
        let deleted = self
            .store
            .delete_one(USERS_COLLECTION, doc! { "_id": id })
            .await?;
        if deleted > 0 {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(deleted > 0)
    }

    async fn insert_admin(&self, admin: Admin) -> AccountResult<ObjectId> {
        let id = self.store.insert(ADMINS_COLLECTION, &admin).await?;
        tracing::info!(admin_id = %id, username = %admin.username, "Created admin");
        Ok(id)
    }

    async fn find_admin_by_username(&self, username: &str) -> AccountResult<Option<Admin>> {
        Ok(self
            .store
            .fetch_one(ADMINS_COLLECTION, doc! { "username": username })
            .await?)
    }

    async fn admin_username_exists(&self, username: &str) -> AccountResult<bool> {
        Ok(self.find_admin_by_username(username).await?.is_some())
    }
}
