//! Note handlers: CRUD over notes the caller can reach.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use notez_core::types::PageResponse;
use notez_entity::note::{Note, NoteWithRole};

use crate::dto::request::{NoteBody, NoteListParams};
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, ValidatedQuery, parse_uuid};
use crate::state::AppState;

/// POST /notes
pub async fn create_note(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(body): ValidatedJson<NoteBody>,
) -> Result<(StatusCode, Json<ApiResponse<Note>>), ApiError> {
    let note = state.note_service.create(&auth, body.into()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(note))))
}

/// GET /notes
pub async fn list_notes(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(params): ValidatedQuery<NoteListParams>,
) -> Result<Json<ApiResponse<PageResponse<NoteWithRole>>>, ApiError> {
    let query = params.into_query()?;
    let page = state.note_service.list(&auth, &query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /notes/{id}
pub async fn get_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<NoteWithRole>>, ApiError> {
    let note_id = parse_uuid(&id)?;
    let note = state.note_service.get(&auth, note_id).await?;
    Ok(Json(ApiResponse::ok(note)))
}

/// PUT|PATCH /notes/{id}
pub async fn update_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(body): ValidatedJson<NoteBody>,
) -> Result<Json<ApiResponse<NoteWithRole>>, ApiError> {
    let note_id = parse_uuid(&id)?;
    let note = state
        .note_service
        .update(&auth, note_id, body.into())
        .await?;
    Ok(Json(ApiResponse::ok(note)))
}

/// DELETE /notes/{id}
pub async fn delete_note(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let note_id = parse_uuid(&id)?;
    state.note_service.delete(&auth, note_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
