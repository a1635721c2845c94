//! Credential-store abstraction over the user table.

use async_trait::async_trait;

use traintrack_core::result::AppResult;
use traintrack_database::repositories::UserRepository;
use traintrack_entity::user::{NewUser, User};

/// The credential store the auth service reads and writes during auth
/// operations. The PostgreSQL repository is the production
/// implementation; tests supply an in-memory one.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Check whether an email is already registered (case-insensitive).
    async fn email_exists(&self, email: &str) -> AppResult<bool>;

    /// Insert a new user and return the store-assigned id.
    async fn insert(&self, user: &NewUser) -> AppResult<i64>;
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        UserRepository::find_by_email(self, email).await
    }

    async fn email_exists(&self, email: &str) -> AppResult<bool> {
        UserRepository::email_exists(self, email).await
    }

    async fn insert(&self, user: &NewUser) -> AppResult<i64> {
        UserRepository::insert(self, user).await
    }
}
