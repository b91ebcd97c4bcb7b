//! Note entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::{EffectiveRole, NoteRole};

/// A note. The owner is fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Note {
    /// Unique note identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Title.
    pub title: String,
    /// Body, absent until written.
    pub content: Option<String>,
    /// When the note was created.
    pub created_at: DateTime<Utc>,
    /// When the note was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a note.
#[derive(Debug, Clone)]
pub struct CreateNote {
    /// Owner of the new note.
    pub owner_id: Uuid,
    /// Title.
    pub title: String,
    /// Optional body.
    pub content: Option<String>,
}

/// Replacement title and body for an existing note.
#[derive(Debug, Clone)]
pub struct UpdateNote {
    /// New title.
    pub title: String,
    /// New body.
    pub content: Option<String>,
}

/// A note together with the requesting user's standing on it, read in a
/// single join of `notes` and `notes_users`.
#[derive(Debug, Clone, FromRow)]
pub struct NoteAccess {
    /// The note row.
    #[sqlx(flatten)]
    pub note: Note,
    /// Whether the requesting user owns the note.
    pub is_owner: bool,
    /// The requesting user's membership role, if any.
    pub member_role: Option<NoteRole>,
}

impl NoteAccess {
    /// Resolve the effective role of the requesting user.
    pub fn role(&self) -> EffectiveRole {
        EffectiveRole::resolve(self.is_owner, self.member_role)
    }
}

/// A note as presented to a user with access to it.
#[derive(Debug, Clone, Serialize)]
pub struct NoteWithRole {
    /// The note.
    #[serde(flatten)]
    pub note: Note,
    /// The viewer's role on it.
    pub role: EffectiveRole,
}

impl From<NoteAccess> for NoteWithRole {
    fn from(access: NoteAccess) -> Self {
        let role = access.role();
        Self {
            note: access.note,
            role,
        }
    }
}
