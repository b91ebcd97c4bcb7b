//! Auth handlers: register, login, logout, check.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};

use notez_core::config::SessionConfig;

use crate::dto::request::{LoginBody, RegisterBody};
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// Builds the http-only session cookie, expiring with the session.
pub fn session_cookie(
    config: &SessionConfig,
    token: String,
    expires_at: DateTime<Utc>,
) -> Cookie<'static> {
    let max_age = (expires_at - Utc::now()).num_seconds().max(0);
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

fn expired_cookie(config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), ""))
        .path("/")
        .http_only(true)
        .secure(config.cookie_secure)
        .build()
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<RegisterBody>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state.auth_service.register(body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user.into()))))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(body): ValidatedJson<LoginBody>,
) -> Result<(CookieJar, Json<ApiResponse<LoginResponse>>), ApiError> {
    let result = state.auth_service.login(&body.email, &body.password).await?;
    let cookie = session_cookie(
        &state.config.session,
        result.session.token,
        result.session.expires_at,
    );

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok(LoginResponse {
            user: result.user.into(),
            expires_at: result.session.expires_at,
        })),
    ))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthUser,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    state.auth_service.logout(&auth).await?;
    Ok((
        jar.remove(expired_cookie(&state.config.session)),
        Json(ApiResponse::ok(MessageResponse::new("Logout success."))),
    ))
}

/// GET /auth/check
pub async fn check(auth: AuthUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(auth.0.user.into()))
}
