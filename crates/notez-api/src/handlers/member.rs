//! Note member handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::request::UpdateMemberRoleBody;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// PATCH /notes/{id}/members/{member_id}
pub async fn update_member_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, member_id)): Path<(String, String)>,
    ValidatedJson(body): ValidatedJson<UpdateMemberRoleBody>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let note_id = parse_uuid(&id)?;
    let member_id = parse_uuid(&member_id)?;
    state
        .member_service
        .update_role(&auth, note_id, member_id, body.role.parse()?)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Member role updated."))))
}

/// DELETE /notes/{id}/members/{member_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, member_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let note_id = parse_uuid(&id)?;
    let member_id = parse_uuid(&member_id)?;
    state.member_service.remove(&auth, note_id, member_id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Member removed."))))
}
