//! Auth service — register, login, refresh, and logout flows.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use traintrack_core::config::auth::AuthConfig;
use traintrack_core::error::AppError;
use traintrack_core::result::AppResult;
use traintrack_entity::user::{NewUser, User, UserRole};

use crate::password::PasswordHasher;
use crate::session::SessionRegistry;
use crate::store::UserStore;
use crate::token::TokenCodec;

/// Raw registration fields as submitted by the client.
///
/// Every field is optional so that presence checking happens here, in
/// order, rather than failing at deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterInput {
    /// Full display name.
    pub full_name: Option<String>,
    /// Date of birth, ISO `YYYY-MM-DD`.
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

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The authenticated user.
    pub user: User,
    /// Short-lived access token, returned to the caller directly.
    pub access_token: String,
    /// Refresh token, to be stored by the HTTP layer as an http-only
    /// cookie rather than returned in the response body.
    pub refresh_token: String,
}

/// Orchestrates registration and the session-token flows.
///
/// The credential store is optional: when the process started without a
/// usable database connection, every operation that needs it degrades to
/// a clean error instead of the server crashing.
pub struct AuthService {
    users: Option<Arc<dyn UserStore>>,
    hasher: PasswordHasher,
    tokens: TokenCodec,
    sessions: Arc<dyn SessionRegistry>,
    password_min_length: usize,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("store_available", &self.users.is_some())
            .field("password_min_length", &self.password_min_length)
            .finish()
    }
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        users: Option<Arc<dyn UserStore>>,
        hasher: PasswordHasher,
        tokens: TokenCodec,
        sessions: Arc<dyn SessionRegistry>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            sessions,
            password_min_length: config.password_min_length,
        }
    }

    /// Whether the credential store is reachable.
    pub fn store_available(&self) -> bool {
        self.users.is_some()
    }

    fn users(&self) -> AppResult<&Arc<dyn UserStore>> {
        self.users
            .as_ref()
            .ok_or_else(|| AppError::database("Database not connected"))
    }

    /// Registers a new user and returns the store-assigned id.
    ///
    /// Validation runs before the store is consulted, in a fixed order
    /// where the first failure wins. New accounts are always created as
    /// active employees.
    pub async fn register(&self, input: RegisterInput) -> AppResult<i64> {
        let reg = validate_registration(&input, self.password_min_length)?;
        let users = self.users()?;

        if users.email_exists(&reg.email).await.map_err(store_fault)? {
            return Err(AppError::conflict(
                "Email already registered. Please use a different email or login.",
            ));
        }

        let password_hash = self.hasher.hash(&reg.password)?;

        let new_user = NewUser {
            full_name: reg.full_name,
            dob: reg.dob,
            email: reg.email,
            contact_number: reg.contact_number,
            position: reg.position,
            gender: reg.gender,
            password_hash,
            role: UserRole::Employee,
            is_active: true,
        };

        let user_id = users.insert(&new_user).await.map_err(store_fault)?;
        info!(user_id, "Registered new user");
        Ok(user_id)
    }

    /// Authenticates a user and issues an access/refresh token pair.
    ///
    /// Unknown email and wrong password produce the identical generic
    /// message so callers cannot enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required."));
        }

        let users = self.users()?;

        let user = users
            .find_by_email(email)
            .await
            .map_err(store_fault)?
            .ok_or_else(|| AppError::unauthorized("Invalid email or password."))?;

        if !user.is_active {
            return Err(AppError::forbidden("User is not active."));
        }

        if !self.hasher.verify(password, &user.password_hash) {
            warn!(user_id = user.id, "Login failed: password mismatch");
            return Err(AppError::unauthorized("Invalid email or password."));
        }

        let access_token = self.tokens.issue_access(user.id, user.role)?;
        let refresh_token = self.tokens.issue_refresh(user.id, user.role)?;
        self.sessions.insert(&refresh_token);

        info!(user_id = user.id, "Login successful");
        Ok(LoginOutcome {
            user,
            access_token,
            refresh_token,
        })
    }

    /// Exchanges a registered, valid refresh token for a new access token.
    ///
    /// The refresh token itself is not rotated. Registry presence is
    /// checked before the signature so that logged-out tokens are
    /// rejected even while still cryptographically valid.
    pub fn refresh(&self, token: Option<&str>) -> AppResult<String> {
        let token = token.ok_or_else(|| AppError::unauthorized("No refresh token provided"))?;

        if !self.sessions.contains(token) {
            return Err(AppError::forbidden("Invalid refresh token"));
        }

        let claims = self
            .tokens
            .decode_refresh(token)
            .map_err(|_| AppError::unauthorized("Invalid or expired refresh token"))?;

        self.tokens.issue_access(claims.sub, claims.role)
    }

    /// Revokes a refresh token. Idempotent; never fails.
    pub fn logout(&self, token: Option<&str>) {
        if let Some(token) = token {
            if self.sessions.remove(token) {
                info!("Refresh token revoked on logout");
            }
        }
    }
}

/// Validated registration fields.
struct Registration {
    full_name: String,
    dob: NaiveDate,
    email: String,
    contact_number: String,
    position: String,
    gender: String,
    password: String,
}

/// Ordered validation; the first failure wins.
fn validate_registration(input: &RegisterInput, min_password: usize) -> AppResult<Registration> {
    let full_name = required(&input.full_name)?;
    let dob = required(&input.dob)?;
    let email = required(&input.email)?;
    let contact_number = required(&input.contact_number)?;
    let position = required(&input.position)?;
    let gender = required(&input.gender)?;
    let password = required(&input.password)?;
    let confirm_password = required(&input.confirm_password)?;

    if password.len() < min_password {
        return Err(AppError::validation(format!(
            "Password must be at least {min_password} characters."
        )));
    }

    if password != confirm_password {
        return Err(AppError::validation(
            "Password and Confirm Password do not match.",
        ));
    }

    if contact_number.len() != 10 || !contact_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(
            "Contact number must be exactly 10 digits.",
        ));
    }

    let first = contact_number.chars().next().unwrap_or_default();
    if contact_number.chars().all(|c| c == first) {
        return Err(AppError::validation(
            "Contact number cannot contain all same digits.",
        ));
    }

    let dob = NaiveDate::parse_from_str(&dob, "%Y-%m-%d")
        .map_err(|_| AppError::validation("Date of birth must be a valid YYYY-MM-DD date."))?;

    Ok(Registration {
        full_name,
        dob,
        email,
        contact_number,
        position,
        gender,
        password,
    })
}

fn required(field: &Option<String>) -> AppResult<String> {
    match field {
        Some(value) if !value.is_empty() => Ok(value.clone()),
        _ => Err(AppError::validation("All fields are required.")),
    }
}

/// Store faults never surface their detail to the caller.
fn store_fault(err: AppError) -> AppError {
    tracing::error!(error = %err, "Credential store fault");
    AppError::internal("Internal server error. Please try again later.")
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use traintrack_core::error::ErrorKind;

    use crate::session::MemorySessionRegistry;

    /// In-memory credential store mirroring the SQL repository semantics.
    #[derive(Default)]
    struct MemoryUserStore {
        users: Mutex<Vec<User>>,
    }

    impl MemoryUserStore {
        fn deactivate(&self, email: &str) {
            let mut users = self.users.lock().unwrap();
            for user in users.iter_mut() {
                if user.email.eq_ignore_ascii_case(email) {
                    user.is_active = false;
                }
            }
        }

        fn password_hash_of(&self, email: &str) -> Option<String> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .map(|u| u.password_hash.clone())
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned())
        }

        async fn email_exists(&self, email: &str) -> AppResult<bool> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(email)))
        }

        async fn insert(&self, user: &NewUser) -> AppResult<i64> {
            let mut users = self.users.lock().unwrap();
            let id = users.len() as i64 + 1;
            users.push(User {
                id,
                full_name: user.full_name.clone(),
                dob: user.dob,
                email: user.email.clone(),
                contact_number: user.contact_number.clone(),
                position: user.position.clone(),
                gender: user.gender.clone(),
                password_hash: user.password_hash.clone(),
                role: user.role,
                is_active: user.is_active,
                created_at: Utc::now(),
            });
            Ok(id)
        }
    }

    fn test_config() -> AuthConfig {
        AuthConfig {
            access_secret: "test-secret".to_string(),
            bcrypt_cost: 4,
            ..AuthConfig::default()
        }
    }

    fn service_with_store() -> (AuthService, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::default());
        let config = test_config();
        let service = AuthService::new(
            Some(store.clone() as Arc<dyn UserStore>),
            PasswordHasher::new(config.bcrypt_cost),
            TokenCodec::new(&config),
            Arc::new(MemorySessionRegistry::new()),
            &config,
        );
        (service, store)
    }

    fn degraded_service() -> AuthService {
        let config = test_config();
        AuthService::new(
            None,
            PasswordHasher::new(config.bcrypt_cost),
            TokenCodec::new(&config),
            Arc::new(MemorySessionRegistry::new()),
            &config,
        )
    }

    fn valid_input() -> RegisterInput {
        RegisterInput {
            full_name: Some("A B".to_string()),
            dob: Some("1990-01-01".to_string()),
            email: Some("a@b.com".to_string()),
            contact_number: Some("9876543210".to_string()),
            position: Some("Junior".to_string()),
            gender: Some("Male".to_string()),
            password: Some("secret1".to_string()),
            confirm_password: Some("secret1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_missing_field_fails_before_store() {
        // A degraded service still reports validation failures, because
        // validation runs before the store is consulted.
        let service = degraded_service();
        let mut input = valid_input();
        input.email = None;

        let err = service.register(input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "All fields are required.");
    }

    #[tokio::test]
    async fn test_register_empty_field_counts_as_missing() {
        let service = degraded_service();
        let mut input = valid_input();
        input.gender = Some(String::new());

        let err = service.register(input).await.unwrap_err();
        assert_eq!(err.message, "All fields are required.");
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let service = degraded_service();
        let mut input = valid_input();
        input.password = Some("abc".to_string());
        input.confirm_password = Some("abc".to_string());

        let err = service.register(input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message, "Password must be at least 6 characters.");
    }

    #[tokio::test]
    async fn test_register_password_mismatch() {
        let service = degraded_service();
        let mut input = valid_input();
        input.confirm_password = Some("secret2".to_string());

        let err = service.register(input).await.unwrap_err();
        assert_eq!(err.message, "Password and Confirm Password do not match.");
    }

    #[tokio::test]
    async fn test_register_contact_number_not_ten_digits() {
        let service = degraded_service();
        for bad in ["12345", "12345678901", "987654321a", "98765-4321"] {
            let mut input = valid_input();
            input.contact_number = Some(bad.to_string());

            let err = service.register(input).await.unwrap_err();
            assert_eq!(err.message, "Contact number must be exactly 10 digits.");
        }
    }

    #[tokio::test]
    async fn test_register_contact_number_all_same_digits() {
        let service = degraded_service();
        for bad in ["0000000000", "9999999999"] {
            let mut input = valid_input();
            input.contact_number = Some(bad.to_string());

            let err = service.register(input).await.unwrap_err();
            assert_eq!(err.message, "Contact number cannot contain all same digits.");
        }
    }

    #[tokio::test]
    async fn test_register_invalid_dob() {
        let service = degraded_service();
        let mut input = valid_input();
        input.dob = Some("not-a-date".to_string());

        let err = service.register(input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_register_degraded_store_reports_database_error() {
        let service = degraded_service();
        let err = service.register(valid_input()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Database);
        assert_eq!(err.message, "Database not connected");
    }

    #[tokio::test]
    async fn test_register_success_then_duplicate_conflict() {
        let (service, _store) = service_with_store();

        let id = service.register(valid_input()).await.unwrap();
        assert_eq!(id, 1);

        let err = service.register(valid_input()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_case_insensitive() {
        let (service, _store) = service_with_store();
        service.register(valid_input()).await.unwrap();

        let mut input = valid_input();
        input.email = Some("A@B.COM".to_string());
        let err = service.register(input).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let (service, store) = service_with_store();
        service.register(valid_input()).await.unwrap();

        let hash = store.password_hash_of("a@b.com").unwrap();
        assert_ne!(hash, "secret1");
        assert!(PasswordHasher::new(4).verify("secret1", &hash));
    }

    #[tokio::test]
    async fn test_login_empty_fields() {
        let (service, _store) = service_with_store();
        let err = service.login("", "secret1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let err = service.login("a@b.com", "").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_same_message() {
        let (service, _store) = service_with_store();
        service.register(valid_input()).await.unwrap();

        let unknown = service.login("nobody@b.com", "secret1").await.unwrap_err();
        let wrong = service.login("a@b.com", "wrong-password").await.unwrap_err();

        assert_eq!(unknown.kind, ErrorKind::Unauthorized);
        assert_eq!(wrong.kind, ErrorKind::Unauthorized);
        assert_eq!(unknown.message, wrong.message);
    }

    #[tokio::test]
    async fn test_login_inactive_user_forbidden() {
        let (service, store) = service_with_store();
        service.register(valid_input()).await.unwrap();
        store.deactivate("a@b.com");

        let err = service.login("a@b.com", "secret1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_login_success_registers_refresh_token() {
        let (service, _store) = service_with_store();
        service.register(valid_input()).await.unwrap();

        let outcome = service.login("a@b.com", "secret1").await.unwrap();
        assert_eq!(outcome.user.role, UserRole::Employee);
        assert!(!outcome.access_token.is_empty());

        // The issued refresh token is immediately usable.
        let access = service.refresh(Some(&outcome.refresh_token)).unwrap();
        assert!(!access.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_requires_token() {
        let (service, _store) = service_with_store();
        let err = service.refresh(None).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_refresh_rejects_unregistered_but_valid_token() {
        // A correctly signed token that was never registered (or was
        // logged out) must be rejected on registry presence alone.
        let (service, _store) = service_with_store();
        let codec = TokenCodec::new(&test_config());
        let token = codec.issue_refresh(1, UserRole::Employee).unwrap();

        let err = service.refresh(Some(&token)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_refresh_rejects_garbage_token_in_registry() {
        let (service, _store) = service_with_store();
        service.sessions.insert("garbage");

        let err = service.refresh(Some("garbage")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_logout_revokes_refresh_token() {
        let (service, _store) = service_with_store();
        service.register(valid_input()).await.unwrap();
        let outcome = service.login("a@b.com", "secret1").await.unwrap();

        service.logout(Some(&outcome.refresh_token));

        let err = service.refresh(Some(&outcome.refresh_token)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let (service, _store) = service_with_store();
        service.logout(Some("never-registered"));
        service.logout(None);
    }
}
