//! Auth handlers — register, login, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use traintrack_core::error::AppError;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{
    LoginResponse, MessageResponse, PublicUser, RefreshResponse, RegisterResponse,
};
use crate::state::AppState;

/// Name of the http-only cookie carrying the refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let user_id = state.auth.register(req.into()).await?;

    Ok(Json(RegisterResponse {
        success: true,
        message: "Registration successful! You can now login with your email.".to_string(),
        user_id,
    }))
}

/// POST /api/login
///
/// On success the refresh token is set as an http-only, lax-same-site
/// cookie; only the access token and public user fields travel in the
/// body.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let outcome = state.auth.login(&req.email, &req.password).await?;

    let jar = jar.add(refresh_cookie(
        outcome.refresh_token.clone(),
        state.config.server.secure_cookies,
        state.config.auth.refresh_ttl_days as i64,
    ));

    Ok((
        jar,
        Json(LoginResponse {
            success: true,
            message: "Login successful.".to_string(),
            user: PublicUser::from(&outcome.user),
            access_token: outcome.access_token,
        }),
    ))
}

/// POST /api/refresh
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<RefreshResponse>, AppError> {
    let token = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());
    let access_token = state.auth.refresh(token.as_deref())?;

    Ok(Json(RefreshResponse {
        success: true,
        access_token,
    }))
}

/// POST /api/logout
///
/// Always succeeds and always clears the cookie, whether or not the
/// presented token was registered.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let token = jar.get(REFRESH_COOKIE).map(|c| c.value().to_string());
    state.auth.logout(token.as_deref());

    let jar = jar.remove(Cookie::build((REFRESH_COOKIE, "")).path("/").build());

    (
        jar,
        Json(MessageResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    )
}

fn refresh_cookie(token: String, secure: bool, ttl_days: i64) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(ttl_days))
        .build()
}
