//! Invitation handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use notez_entity::invitation::InvitationView;

use crate::dto::request::{CreateInvitationBody, RespondInvitationBody};
use crate::dto::response::{ApiResponse, InvitationResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, parse_uuid};
use crate::state::AppState;

/// POST /note-invitations
pub async fn create_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<CreateInvitationBody>,
) -> Result<(StatusCode, Json<ApiResponse<InvitationResponse>>), ApiError> {
    let invitation = state
        .invitation_service
        .create(&auth, body.into_request()?)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(invitation.into()))))
}

/// GET /note-invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<InvitationView>>>, ApiError> {
    let invitations = state.invitation_service.list(&auth).await?;
    Ok(Json(ApiResponse::ok(invitations)))
}

/// PATCH /note-invitations/{id}
pub async fn respond_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<RespondInvitationBody>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let invitation_id = parse_uuid(&id)?;
    let outcome = state
        .invitation_service
        .respond(&auth, invitation_id, body.accept)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(outcome.message()))))
}
