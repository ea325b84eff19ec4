use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "users";

/// Collection holding admin documents
pub const ADMINS_COLLECTION: &str = "admins";

/// Wildcard preference value: matches every job
pub const PREFERENCE_ANY: &str = "any";

/// A user's desired job location and type.
///
/// Either field may be the wildcard [`PREFERENCE_ANY`]. The job directory
/// owns the matching rules; this is just the stored shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub location: String,
    pub job_type: String,
}

impl Preference {
    pub fn new(location: impl Into<String>, job_type: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            job_type: job_type.into(),
        }
    }

    /// The default preference for a fresh account: match everything.
    pub fn any() -> Self {
        Self::new(PREFERENCE_ANY, PREFERENCE_ANY)
    }
}

impl Default for Preference {
    fn default() -> Self {
        Self::any()
    }
}

/// User entity as stored in the `users` collection
///
/// `username` and `email` are each unique across all users; the service
/// enforces this with lookups before insert. Only the argon2 hash of the
/// password is ever stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub password_hash: String,
    pub preference: Preference,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            preference: Preference::any(),
        }
    }
}

/// Admin entity as stored in the `admins` collection
///
/// Admins carry no role hierarchy; presence of a matching account is the
/// whole contract. Authorization decisions belong to the calling layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub password_hash: String,
}

impl Admin {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

/// Account DTO handed back to callers: id stringified, hash never exposed.
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub preference: Preference,
}

impl From<User> for AccountResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username,
            email: user.email,
            preference: user.preference,
        }
    }
}

/// Optional-field changes for an account update; unset fields are untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAccount {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateAccount {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}
