//! Invitation entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::note::NoteRole;

/// A pending offer of membership. At most one exists per `(note_id, user_id)`.
///
/// Accepting converts it into a membership; declining deletes it. Neither
/// outcome leaves a row behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Invitation {
    /// Unique invitation identifier (UUIDv7).
    pub id: Uuid,
    /// Target note.
    pub note_id: Uuid,
    /// Invited user.
    pub user_id: Uuid,
    /// Inviting user, always the note owner.
    pub inviter_id: Uuid,
    /// Proposed role.
    pub role: NoteRole,
    /// When the invitation was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create an invitation.
#[derive(Debug, Clone)]
pub struct CreateInvitation {
    /// Target note.
    pub note_id: Uuid,
    /// Invited user.
    pub user_id: Uuid,
    /// Inviting user.
    pub inviter_id: Uuid,
    /// Proposed role.
    pub role: NoteRole,
}

/// Flat join row behind [`InvitationView`].
#[derive(Debug, Clone, FromRow)]
pub struct InvitationRow {
    pub id: Uuid,
    pub note_id: Uuid,
    pub note_title: String,
    pub inviter_id: Uuid,
    pub inviter_email: String,
    pub inviter_name: Option<String>,
    pub role: NoteRole,
    pub created_at: DateTime<Utc>,
}

/// A pending invitation as shown to its recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitationView {
    /// Invitation id.
    pub id: Uuid,
    /// The note on offer.
    pub note: InvitedNote,
    /// Who sent it.
    pub inviter: Inviter,
    /// Proposed role.
    pub role: NoteRole,
    /// When it was sent.
    pub created_at: DateTime<Utc>,
}

/// Note summary embedded in an invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvitedNote {
    pub id: Uuid,
    pub title: String,
}

/// Inviter identity embedded in an invitation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inviter {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
}

impl From<InvitationRow> for InvitationView {
    fn from(row: InvitationRow) -> Self {
        Self {
            id: row.id,
            note: InvitedNote {
                id: row.note_id,
                title: row.note_title,
            },
            inviter: Inviter {
                id: row.inviter_id,
                email: row.inviter_email,
                name: row.inviter_name,
            },
            role: row.role,
            created_at: row.created_at,
        }
    }
}
