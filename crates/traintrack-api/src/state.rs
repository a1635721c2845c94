//! Application state shared across all handlers.

use std::sync::Arc;

use traintrack_auth::AuthService;
use traintrack_core::config::AppConfig;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Auth service orchestrating all credential and token flows.
    pub auth: Arc<AuthService>,
}
