//! Note service: create, list, read, edit, and delete notes.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use notez_auth::acl::{AccessEvaluator, NOTE_NOT_FOUND, NoteAction};
use notez_core::error::AppError;
use notez_core::types::PageResponse;
use notez_database::traits::NoteStore;
use notez_entity::note::{CreateNote, Note, NoteQuery, NoteWithRole, UpdateNote};

use crate::context::RequestContext;

/// Title and body supplied when creating or editing a note.
#[derive(Debug, Clone)]
pub struct NoteInput {
    /// Title.
    pub title: String,
    /// Optional body.
    pub content: Option<String>,
}

/// Note operations on behalf of the requesting user.
#[derive(Debug, Clone)]
pub struct NoteService {
    notes: Arc<dyn NoteStore>,
    access: Arc<AccessEvaluator>,
}

impl NoteService {
    /// Creates a new note service.
    pub fn new(notes: Arc<dyn NoteStore>, access: Arc<AccessEvaluator>) -> Self {
        Self { notes, access }
    }

    /// Creates a note owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, input: NoteInput) -> Result<Note, AppError> {
        let note = self
            .notes
            .create(&CreateNote {
                owner_id: ctx.user_id(),
                title: input.title,
                content: input.content,
            })
            .await?;
        info!(note_id = %note.id, user_id = %ctx.user_id(), "Note created");
        Ok(note)
    }

    /// Pages through every note the caller owns or is a member of.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &NoteQuery,
    ) -> Result<PageResponse<NoteWithRole>, AppError> {
        self.notes.list_accessible(ctx.user_id(), query).await
    }

    /// Fetches a note the caller holds any role on.
    pub async fn get(&self, ctx: &RequestContext, note_id: Uuid) -> Result<NoteWithRole, AppError> {
        let access = self
            .access
            .authorize(ctx.user_id(), note_id, NoteAction::Read)
            .await?;
        Ok(access.into())
    }

    /// Replaces title and body. Owner or editor only.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        note_id: Uuid,
        input: NoteInput,
    ) -> Result<NoteWithRole, AppError> {
        let access = self
            .access
            .authorize(ctx.user_id(), note_id, NoteAction::EditContent)
            .await?;
        let role = access.role();

        let note = self
            .notes
            .update(
                note_id,
                &UpdateNote {
                    title: input.title,
                    content: input.content,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found(NOTE_NOT_FOUND))?;

        info!(note_id = %note.id, user_id = %ctx.user_id(), role = %role, "Note updated");
        Ok(NoteWithRole { note, role })
    }

    /// Deletes a note along with its memberships and invitations. Owner only.
    pub async fn delete(&self, ctx: &RequestContext, note_id: Uuid) -> Result<(), AppError> {
        self.access
            .authorize(ctx.user_id(), note_id, NoteAction::Administer)
            .await?;
        if !self.notes.delete(note_id).await? {
            return Err(AppError::not_found(NOTE_NOT_FOUND));
        }
        info!(note_id = %note_id, user_id = %ctx.user_id(), "Note deleted");
        Ok(())
    }
}
