//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use chrono::Utc;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use traintrack_api::state::AppState;
use traintrack_auth::{
    AuthService, MemorySessionRegistry, PasswordHasher, TokenCodec, UserStore,
};
use traintrack_core::config::AppConfig;
use traintrack_core::result::AppResult;
use traintrack_entity::user::{NewUser, User};

/// In-memory credential store mirroring the SQL repository semantics.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    /// Number of stored user records.
    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    /// Flip a user's active flag off.
    pub fn deactivate(&self, email: &str) {
        let mut users = self.users.lock().unwrap();
        for user in users.iter_mut() {
            if user.email.eq_ignore_ascii_case(email) {
                user.is_active = false;
            }
        }
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

/// A response captured from the router.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
    pub set_cookie: Option<String>,
}

/// Test application context driving the real router in-process.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryUserStore>,
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application backed by an in-memory user store.
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Create a test application with no store connection (degraded mode).
    pub fn degraded() -> Self {
        Self::build(false)
    }

    fn build(with_store: bool) -> Self {
        let mut config = AppConfig::default();
        config.auth.access_secret = "integration-test-secret".to_string();
        // Minimum cost keeps the tests fast.
        config.auth.bcrypt_cost = 4;

        let store = Arc::new(MemoryUserStore::default());
        let users = with_store.then(|| store.clone() as Arc<dyn UserStore>);

        let auth = Arc::new(AuthService::new(
            users,
            PasswordHasher::new(config.auth.bcrypt_cost),
            TokenCodec::new(&config.auth),
            Arc::new(MemorySessionRegistry::new()),
            &config.auth,
        ));

        let state = AppState {
            config: Arc::new(config.clone()),
            auth,
        };

        Self {
            router: traintrack_api::build_router(state),
            store,
            config,
        }
    }

    /// A token codec sharing the application's secrets, for crafting
    /// tokens outside the normal login flow.
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(&self.config.auth)
    }

    /// Issue a request against the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookie,
        }
    }

    /// Register the standard test user.
    pub async fn register_default(&self) -> TestResponse {
        self.request("POST", "/api/register", Some(default_registration()), None)
            .await
    }

    /// Log in and return `(access_token, refresh_cookie)`.
    pub async fn login(&self, email: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/api/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);

        let access = response.body["accessToken"].as_str().unwrap().to_string();
        let cookie = cookie_pair(&response.set_cookie.unwrap());
        (access, cookie)
    }
}

/// The registration payload from the end-to-end scenario.
pub fn default_registration() -> Value {
    serde_json::json!({
        "fullName": "A B",
        "dob": "1990-01-01",
        "email": "a@b.com",
        "contactNumber": "9876543210",
        "position": "Junior",
        "gender": "Male",
        "password": "secret1",
        "confirmPassword": "secret1",
    })
}

/// Extract the `name=value` pair from a Set-Cookie header.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string()
}
