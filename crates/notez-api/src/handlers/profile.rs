//! Profile handlers for the signed-in user.

use axum::Json;
use axum::extract::State;

use crate::dto::request::{UpdateEmailBody, UpdateNameBody, UpdatePasswordBody};
use crate::dto::response::{ApiResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// PATCH /profile
pub async fn update_name(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<UpdateNameBody>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.profile_service.update_name(&auth, body.name).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PATCH /profile/email
pub async fn update_email(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<UpdateEmailBody>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.profile_service.update_email(&auth, &body.email).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PATCH /profile/password
pub async fn update_password(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<UpdatePasswordBody>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state
        .profile_service
        .update_password(&auth, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Password updated."))))
}
