//! Request DTOs.

use serde::{Deserialize, Serialize};

use traintrack_auth::RegisterInput;

/// Registration request body.
///
/// All fields are optional at the wire level; presence is validated by
/// the auth service so a missing field produces the ordered
/// "All fields are required." response instead of a deserialization
/// error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    /// Full display name.
    pub full_name: Option<String>,
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Contact number.
    pub contact_number: Option<String>,
    /// Job position.
    pub position: Option<String>,
    /// Gender.
    pub gender: Option<String>,
    /// Desired password.
    pub password: Option<String>,
    /// Password confirmation.
    pub confirm_password: Option<String>,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            full_name: req.full_name,
            dob: req.dob,
            email: req.email,
            contact_number: req.contact_number,
            position: req.position,
            gender: req.gender,
            password: req.password,
            confirm_password: req.confirm_password,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
}
