//! Token creation and validation with distinct access/refresh secrets.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use traintrack_core::config::auth::AuthConfig;
use traintrack_core::error::AppError;
use traintrack_entity::user::UserRole;

use super::claims::{Claims, TokenType};

/// Creates and validates signed access and refresh tokens.
///
/// Access and refresh tokens are signed with distinct HMAC secrets. When
/// no dedicated refresh secret is configured, the refresh secret is
/// derived as `<access_secret>_rt` — a compatibility behavior carried
/// over from existing deployments, not a recommended setup.
#[derive(Clone)]
pub struct TokenCodec {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
    /// Validation settings shared by both token kinds.
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

impl TokenCodec {
    /// Creates a new codec from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let refresh_secret = config
            .refresh_secret
            .clone()
            .unwrap_or_else(|| format!("{}_rt", config.access_secret));

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // 5 seconds leeway for clock skew

        Self {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
            access_ttl_minutes: config.access_ttl_minutes as i64,
            refresh_ttl_days: config.refresh_ttl_days as i64,
            validation,
        }
    }

    /// Issues a short-lived access token for the given user.
    pub fn issue_access(&self, user_id: i64, role: UserRole) -> Result<String, AppError> {
        let ttl = chrono::Duration::minutes(self.access_ttl_minutes);
        self.issue(user_id, role, TokenType::Access, ttl, &self.access_encoding)
    }

    /// Issues a long-lived refresh token for the given user.
    pub fn issue_refresh(&self, user_id: i64, role: UserRole) -> Result<String, AppError> {
        let ttl = chrono::Duration::days(self.refresh_ttl_days);
        self.issue(user_id, role, TokenType::Refresh, ttl, &self.refresh_encoding)
    }

    /// Decodes and validates an access token.
    pub fn decode_access(&self, token: &str) -> Result<Claims, AppError> {
        self.decode(token, TokenType::Access, &self.access_decoding)
    }

    /// Decodes and validates a refresh token.
    pub fn decode_refresh(&self, token: &str) -> Result<Claims, AppError> {
        self.decode(token, TokenType::Refresh, &self.refresh_decoding)
    }

    fn issue(
        &self,
        user_id: i64,
        role: UserRole,
        token_type: TokenType,
        ttl: chrono::Duration,
        key: &EncodingKey,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            token_type,
        };

        encode(&Header::default(), &claims, key)
            .map_err(|e| AppError::with_source(
                traintrack_core::error::ErrorKind::Internal,
                "Failed to encode token",
                e,
            ))
    }

    /// Signature mismatch, expiry, malformed payloads, and token-type
    /// confusion all collapse into the same generic outcome. Callers never
    /// learn which check failed.
    fn decode(
        &self,
        token: &str,
        expected: TokenType,
        key: &DecodingKey,
    ) -> Result<Claims, AppError> {
        let data = decode::<Claims>(token, key, &self.validation)
            .map_err(|_| AppError::unauthorized("Invalid or expired token"))?;

        if data.claims.token_type != expected {
            return Err(AppError::unauthorized("Invalid or expired token"));
        }

        Ok(data.claims)
    }
}
