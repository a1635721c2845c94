//! bcrypt password hashing and verification.

use traintrack_core::error::AppError;

/// Handles password hashing and verification using bcrypt.
///
/// The work factor is fixed at construction; existing digests remain
/// verifiable regardless of the configured cost because bcrypt encodes
/// the cost in the digest itself.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// bcrypt work factor.
    cost: u32,
}

impl PasswordHasher {
    /// Creates a new password hasher with the given work factor.
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hashes a plaintext password with a random salt.
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::with_source(
                traintrack_core::error::ErrorKind::Internal,
                "Password hashing failed",
                e,
            ))
    }

    /// Verifies a plaintext password against a stored digest.
    ///
    /// Returns `false` for a non-matching password and for malformed
    /// digests. Never errors.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        bcrypt::verify(password, digest).unwrap_or(false)
    }
}
