//! Resolves a user's effective role on a note and enforces action rules.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use notez_core::error::AppError;
use notez_database::traits::NoteStore;
use notez_entity::note::{EffectiveRole, NoteAccess};

/// Message for any note the caller may not act on, existing or not.
pub const NOTE_NOT_FOUND: &str = "Note not found.";

/// Actions gated by the effective role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteAction {
    /// Fetch the note.
    Read,
    /// Change title or content.
    EditContent,
    /// Delete, invite, and manage members.
    Administer,
}

impl NoteAction {
    /// Whether `role` permits this action.
    pub fn permitted_for(&self, role: EffectiveRole) -> bool {
        match self {
            Self::Read => role.can_read(),
            Self::EditContent => role.can_edit_content(),
            Self::Administer => role.can_administer(),
        }
    }
}

/// Determines the effective role of a user on a note.
///
/// Owner and membership are read in a single join. Every denial surfaces as
/// `NotFound` so callers cannot discover notes they have no role on.
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    notes: Arc<dyn NoteStore>,
}

impl AccessEvaluator {
    /// Creates a new access evaluator.
    pub fn new(notes: Arc<dyn NoteStore>) -> Self {
        Self { notes }
    }

    /// The user's role on the note; `None` also for missing notes.
    pub async fn effective_role(
        &self,
        user_id: Uuid,
        note_id: Uuid,
    ) -> Result<EffectiveRole, AppError> {
        Ok(self
            .notes
            .find_access(note_id, user_id)
            .await?
            .map(|access| access.role())
            .unwrap_or(EffectiveRole::None))
    }

    /// Load the note if the user may perform `action` on it.
    pub async fn authorize(
        &self,
        user_id: Uuid,
        note_id: Uuid,
        action: NoteAction,
    ) -> Result<NoteAccess, AppError> {
        match self.notes.find_access(note_id, user_id).await? {
            Some(access) if action.permitted_for(access.role()) => Ok(access),
            Some(access) => {
                debug!(
                    user_id = %user_id,
                    note_id = %note_id,
                    role = %access.role(),
                    action = ?action,
                    "Note action denied"
                );
                Err(AppError::not_found(NOTE_NOT_FOUND))
            }
            None => Err(AppError::not_found(NOTE_NOT_FOUND)),
        }
    }
}
