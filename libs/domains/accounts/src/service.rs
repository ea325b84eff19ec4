use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use std::sync::Arc;

use database::parse_oid;

use crate::error::{AccountError, AccountResult};
use crate::models::{AccountResponse, Admin, Preference, UpdateAccount, User};
use crate::repository::AccountRepository;

/// Service layer for account business logic
///
/// Every operation that takes a caller-supplied id parses it first; a
/// malformed id fails before any lookup runs.
#[derive(Clone)]
pub struct AccountService<R: AccountRepository> {
    repository: Arc<R>,
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user account with the default match-everything preference.
    ///
    /// Username and email are checked as two independent lookups before the
    /// insert; two concurrent creates with the same username can both pass
    /// the check before either insert lands. A unique index at the store is
    /// the deployment-level guard for that window.
    pub async fn add_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> AccountResult<AccountResponse> {
        self.require_filled(&[("username", username), ("email", email), ("password", password)])?;

        if self.repository.username_exists(username).await? {
            return Err(AccountError::DuplicateUsername(username.to_string()));
        }
        if self.repository.email_exists(email).await? {
            return Err(AccountError::DuplicateEmail(email.to_string()));
        }

        let password_hash = self.hash_password(password)?;
        let mut user = User::new(username, email, password_hash);
        let id = self.repository.insert_user(user.clone()).await?;
        user.id = Some(id);

        Ok(user.into())
    }

    /// Check a password against the account with the given id.
    ///
    /// Returns false for an unknown id as well as for a wrong password; the
    /// success surface never says which. A malformed id still fails loudly.
    pub async fn check_account(&self, id: &str, password: &str) -> AccountResult<bool> {
        let oid = parse_oid(id)?;
        match self.repository.find_user_by_id(oid).await? {
            Some(user) => self.verify_password(password, &user.password_hash),
            None => Ok(false),
        }
    }

    /// Resolve a username/password pair to the account id.
    ///
    /// Unknown username and wrong password both surface as
    /// [`AccountError::InvalidCredentials`].
    pub async fn get_user_id(&self, username: &str, password: &str) -> AccountResult<String> {
        let user = self
            .repository
            .find_user_by_username(username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(user.id.map(|id| id.to_hex()).unwrap_or_default())
    }

    /// Apply a partial update to an account.
    pub async fn update_account(
        &self,
        id: &str,
        changes: UpdateAccount,
    ) -> AccountResult<AccountResponse> {
        let oid = parse_oid(id)?;
        let mut user = self
            .repository
            .find_user_by_id(oid)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;

        if let Some(ref username) = changes.username {
            if *username != user.username && self.repository.username_exists(username).await? {
                return Err(AccountError::DuplicateUsername(username.clone()));
            }
            user.username = username.clone();
        }
        if let Some(ref email) = changes.email {
            if *email != user.email && self.repository.email_exists(email).await? {
                return Err(AccountError::DuplicateEmail(email.clone()));
            }
            user.email = email.clone();
        }
        if let Some(ref password) = changes.password {
            user.password_hash = self.hash_password(password)?;
        }

        self.repository.update_user(&user).await?;
        Ok(user.into())
    }

    /// Delete an account.
    ///
    /// Reports referencing this user are left in place; a dangling report is
    /// a documented gap, not an error.
    pub async fn delete_account(&self, id: &str) -> AccountResult<()> {
        let oid = parse_oid(id)?;
        if !self.repository.delete_user(oid).await? {
            return Err(AccountError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Replace the stored job preference for an account.
    pub async fn update_preference(
        &self,
        id: &str,
        location: &str,
        job_type: &str,
    ) -> AccountResult<Preference> {
        let oid = parse_oid(id)?;
        let preference = Preference::new(location, job_type);
        if !self.repository.set_preference(oid, &preference).await? {
            return Err(AccountError::NotFound(id.to_string()));
        }
        Ok(preference)
    }

    /// Fetch the stored job preference for an account.
    pub async fn check_preference(&self, id: &str) -> AccountResult<Preference> {
        let oid = parse_oid(id)?;
        let user = self
            .repository
            .find_user_by_id(oid)
            .await?
            .ok_or_else(|| AccountError::NotFound(id.to_string()))?;
        Ok(user.preference)
    }

    /// Create an admin account.
    pub async fn add_admin(&self, username: &str, password: &str) -> AccountResult<String> {
        self.require_filled(&[("username", username), ("password", password)])?;

        if self.repository.admin_username_exists(username).await? {
            return Err(AccountError::DuplicateUsername(username.to_string()));
        }

        let password_hash = self.hash_password(password)?;
        let id = self
            .repository
            .insert_admin(Admin::new(username, password_hash))
            .await?;
        Ok(id.to_hex())
    }

    /// Resolve an admin username/password pair to the admin id.
    pub async fn get_admin_id(&self, username: &str, password: &str) -> AccountResult<String> {
        let admin = self
            .repository
            .find_admin_by_username(username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !self.verify_password(password, &admin.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(admin.id.map(|id| id.to_hex()).unwrap_or_default())
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> AccountResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AccountError::PasswordHash(e.to_string()))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AccountResult<bool> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AccountError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn require_filled(&self, fields: &[(&'static str, &str)]) -> AccountResult<()> {
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AccountError::Validation(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryAccountRepository;

    fn service() -> AccountService<InMemoryAccountRepository> {
        AccountService::new(InMemoryAccountRepository::new())
    }

    #[tokio::test]
    async fn test_add_account_defaults_preference_to_any() {
        let service = service();
        let account = service.add_account("alice", "a@x.com", "pw1").await.unwrap();

        assert_eq!(account.username, "alice");
        assert_eq!(account.preference, Preference::any());
        assert!(!account.user_id.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let service = service();
        service.add_account("alice", "a@x.com", "pw1").await.unwrap();

        let result = service.add_account("alice", "other@x.com", "pw2").await;
        assert!(matches!(
            result,
            Err(AccountError::DuplicateUsername(name)) if name == "alice"
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let service = service();
        service.add_account("alice", "a@x.com", "pw1").await.unwrap();

        let result = service.add_account("bob", "a@x.com", "pw2").await;
        assert!(matches!(
            result,
            Err(AccountError::DuplicateEmail(email)) if email == "a@x.com"
        ));
    }

    #[tokio::test]
    async fn test_check_account_verifies_hash_not_plaintext() {
        let service = service();
        let account = service.add_account("alice", "a@x.com", "pw1").await.unwrap();

        assert!(service.check_account(&account.user_id, "pw1").await.unwrap());
        assert!(!service.check_account(&account.user_id, "wrong").await.unwrap());
    }

    #[tokio::test]
    async fn test_check_account_unknown_id_is_false_not_error() {
        let service = service();
        let unknown = mongodb::bson::oid::ObjectId::new().to_hex();
        assert!(!service.check_account(&unknown, "pw1").await.unwrap());
    }

    #[tokio::test]
    async fn test_check_account_malformed_id_fails_distinctly() {
        let service = service();
        let result = service.check_account("garbage", "pw1").await;
        assert!(matches!(result, Err(AccountError::MalformedId(_))));
    }

    #[tokio::test]
    async fn test_get_user_id_roundtrip_and_uniform_failure() {
        let service = service();
        let account = service.add_account("alice", "a@x.com", "pw1").await.unwrap();

        let id = service.get_user_id("alice", "pw1").await.unwrap();
        assert_eq!(id, account.user_id);

        // Unknown user and wrong password fail the same way.
        assert!(matches!(
            service.get_user_id("nobody", "pw1").await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(matches!(
            service.get_user_id("alice", "wrong").await,
            Err(AccountError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_update_account_partial_merge() {
        let service = service();
        let account = service.add_account("alice", "a@x.com", "pw1").await.unwrap();

        let updated = service
            .update_account(
                &account.user_id,
                UpdateAccount {
                    email: Some("new@x.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.username, "alice"); // untouched
        assert_eq!(updated.email, "new@x.com");
    }

    #[tokio::test]
    async fn test_update_account_rejects_taken_username() {
        let service = service();
        service.add_account("alice", "a@x.com", "pw1").await.unwrap();
        let bob = service.add_account("bob", "b@x.com", "pw2").await.unwrap();

        let result = service
            .update_account(
                &bob.user_id,
                UpdateAccount {
                    username: Some("alice".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AccountError::DuplicateUsername(_))));
    }

    #[tokio::test]
    async fn test_update_account_rehashes_password() {
        let service = service();
        let account = service.add_account("alice", "a@x.com", "pw1").await.unwrap();

        service
            .update_account(
                &account.user_id,
                UpdateAccount {
                    password: Some("pw2".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!service.check_account(&account.user_id, "pw1").await.unwrap());
        assert!(service.check_account(&account.user_id, "pw2").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_account_not_found() {
        let service = service();
        let unknown = mongodb::bson::oid::ObjectId::new().to_hex();
        let result = service.update_account(&unknown, UpdateAccount::default()).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_account() {
        let service = service();
        let account = service.add_account("alice", "a@x.com", "pw1").await.unwrap();

        service.delete_account(&account.user_id).await.unwrap();
        let again = service.delete_account(&account.user_id).await;
        assert!(matches!(again, Err(AccountError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_preference_update_and_check() {
        let service = service();
        let account = service.add_account("alice", "a@x.com", "pw1").await.unwrap();

        assert_eq!(
            service.check_preference(&account.user_id).await.unwrap(),
            Preference::any()
        );

        let preference = service
            .update_preference(&account.user_id, "Brooklyn, NY", "intern")
            .await
            .unwrap();
        assert_eq!(preference.location, "Brooklyn, NY");

        assert_eq!(
            service.check_preference(&account.user_id).await.unwrap(),
            preference
        );
    }

    #[tokio::test]
    async fn test_preference_ops_not_found() {
        let service = service();
        let unknown = mongodb::bson::oid::ObjectId::new().to_hex();

        assert!(matches!(
            service.update_preference(&unknown, "NYC", "intern").await,
            Err(AccountError::NotFound(_))
        ));
        assert!(matches!(
            service.check_preference(&unknown).await,
            Err(AccountError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_admin_lifecycle() {
        let service = service();
        let id = service.add_admin("root", "pw1").await.unwrap();

        assert_eq!(service.get_admin_id("root", "pw1").await.unwrap(), id);
        assert!(matches!(
            service.get_admin_id("root", "wrong").await,
            Err(AccountError::InvalidCredentials)
        ));
        assert!(matches!(
            service.add_admin("root", "pw2").await,
            Err(AccountError::DuplicateUsername(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_fields_rejected() {
        let service = service();
        let result = service.add_account("", "a@x.com", "pw1").await;
        assert!(matches!(result, Err(AccountError::Validation(_))));
    }
}
