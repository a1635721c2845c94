//! User repository implementation.

use sqlx::PgPool;

use traintrack_core::error::{AppError, ErrorKind};
use traintrack_core::result::AppResult;
use traintrack_entity::user::{NewUser, User};

/// Repository for user credential lookups and registration inserts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Check whether an email is already registered (case-insensitive).
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check email", e))
    }

    /// Insert a new user and return the store-assigned id.
    ///
    /// `created_at` is assigned by the database.
    pub async fn insert(&self, user: &NewUser) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO users \
             (full_name, dob, email, contact_number, position, gender, password_hash, role, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(&user.full_name)
        .bind(user.dob)
        .bind(&user.email)
        .bind(&user.contact_number)
        .bind(&user.position)
        .bind(&user.gender)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert user", e))
    }
}
