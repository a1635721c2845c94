//! User entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::UserRole;

/// A registered user in the training tracker.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Store-assigned numeric identifier.
    pub id: i64,
    /// Full display name.
    pub full_name: String,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Email address. Stored as entered, compared case-insensitively.
    pub email: String,
    /// Contact number (exactly 10 digits).
    pub contact_number: String,
    /// Job position (free-form).
    pub position: String,
    /// Gender (free-form).
    pub gender: String,
    /// bcrypt password hash. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// User role.
    pub role: UserRole,
    /// Whether the account may log in.
    pub is_active: bool,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a new user.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    /// Full display name.
    pub full_name: String,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Email address.
    pub email: String,
    /// Contact number.
    pub contact_number: String,
    /// Job position.
    pub position: String,
    /// Gender.
    pub gender: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Assigned role.
    pub role: UserRole,
    /// Whether the account starts active.
    pub is_active: bool,
}
