//! Response DTOs.
//!
//! Field casing mirrors the wire format the front end already consumes:
//! camelCase keys, and PascalCase for the public user fields.

use serde::{Deserialize, Serialize};

use traintrack_entity::user::User;

/// Successful registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Store-assigned user id.
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: String,
    /// Public user fields.
    pub user: PublicUser,
    /// Short-lived access token. The refresh token travels only in the
    /// http-only cookie.
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// The user fields exposed to the client after login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    /// User id.
    #[serde(rename = "Id")]
    pub id: i64,
    /// Email address.
    #[serde(rename = "Email")]
    pub email: String,
    /// Full display name.
    #[serde(rename = "FullName")]
    pub full_name: String,
    /// Role string, e.g. `"EMPLOYEE"`.
    #[serde(rename = "Role")]
    pub role: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            role: user.role.to_string(),
        }
    }
}

/// Successful token refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Always `true` on the success path.
    pub success: bool,
    /// Newly minted access token.
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Simple acknowledgement response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Whether the request succeeded.
    pub success: bool,
    /// Service status.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Credential store status: "connected" or "unavailable".
    pub database: String,
}
