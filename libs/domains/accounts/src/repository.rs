use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::AccountResult;
use crate::models::{Admin, Preference, User};

/// Repository trait for account persistence
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new user and return its generated id
    async fn insert_user(&self, user: User) -> AccountResult<ObjectId>;

    /// Get a user by id
    async fn find_user_by_id(&self, id: ObjectId) -> AccountResult<Option<User>>;

    /// Get a user by username
    async fn find_user_by_username(&self, username: &str) -> AccountResult<Option<User>>;

    /// Check if a username is already taken
    async fn username_exists(&self, username: &str) -> AccountResult<bool>;

    /// Check if an email is already registered
    async fn email_exists(&self, email: &str) -> AccountResult<bool>;

    /// Write back an updated user; returns false when the id matched nothing
    async fn update_user(&self, user: &User) -> AccountResult<bool>;

    /// Overwrite a user's stored preference; returns false when absent
    async fn set_preference(&self, id: ObjectId, preference: &Preference) -> AccountResult<bool>;

    /// Delete a user by id; returns false when already absent
    async fn delete_user(&self, id: ObjectId) -> AccountResult<bool>;

    /// Insert a new admin and return its generated id
    async fn insert_admin(&self, admin: Admin) -> AccountResult<ObjectId>;

    /// Get an admin by username
    async fn find_admin_by_username(&self, username: &str) -> AccountResult<Option<Admin>>;

    /// Check if an admin username is already taken
    async fn admin_username_exists(&self, username: &str) -> AccountResult<bool>;
}

/// In-memory implementation of AccountRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountRepository {
    users: Arc<RwLock<HashMap<ObjectId, User>>>,
    admins: Arc<RwLock<HashMap<ObjectId, Admin>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert_user(&self, mut user: User) -> AccountResult<ObjectId> {
        let mut users = self.users.write().await;
        let id = ObjectId::new();
        user.id = Some(id);

        tracing::info!(user_id = %id, username = %user.username, "Created user");
        users.insert(id, user);
        Ok(id)
    }

    async fn find_user_by_id(&self, id: ObjectId) -> AccountResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> AccountResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn username_exists(&self, username: &str) -> AccountResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.username == username))
    }

    async fn email_exists(&self, email: &str) -> AccountResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn update_user(&self, user: &User) -> AccountResult<bool> {
        let mut users = self.users.write().await;
        match user.id.filter(|id| users.contains_key(id)) {
            Some(id) => {
                users.insert(id, user.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_preference(&self, id: ObjectId, preference: &Preference) -> AccountResult<bool> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.preference = preference.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_user(&self, id: ObjectId) -> AccountResult<bool> {
        let mut users = self.users.write().await;
        let removed = users.remove(&id).is_some();
        if removed {
            tracing::info!(user_id = %id, "Deleted user");
        }
        Ok(removed)
    }

    async fn insert_admin(&self, mut admin: Admin) -> AccountResult<ObjectId> {
        let mut admins = self.admins.write().await;
        let id = ObjectId::new();
        admin.id = Some(id);

        tracing::info!(admin_id = %id, username = %admin.username, "Created admin");
        admins.insert(id, admin);
        Ok(id)
    }

    async fn find_admin_by_username(&self, username: &str) -> AccountResult<Option<Admin>> {
        let admins = self.admins.read().await;
        Ok(admins.values().find(|a| a.username == username).cloned())
    }

    async fn admin_username_exists(&self, username: &str) -> AccountResult<bool> {
        let admins = self.admins.read().await;
        Ok(admins.values().any(|a| a.username == username))
    }
}
