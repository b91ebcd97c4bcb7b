//! Membership entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::NoteRole;

/// A grant of a role on a note to a non-owner. Keyed by `(note_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Membership {
    /// The shared note.
    pub note_id: Uuid,
    /// The member.
    pub user_id: Uuid,
    /// Granted role.
    pub role: NoteRole,
    /// When the grant was made.
    pub created_at: DateTime<Utc>,
}
