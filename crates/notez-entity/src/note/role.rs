//! Membership roles and effective access roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role stored on a membership or an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "note_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NoteRole {
    /// May read and edit content.
    Editor,
    /// May read.
    Viewer,
}

impl NoteRole {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for NoteRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NoteRole {
    type Err = notez_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            _ => Err(notez_core::AppError::validation(
                "Role must be either 'editor' or 'viewer'.",
            )),
        }
    }
}

/// The resolved standing of a user on a note.
///
/// Ordered by privilege: Owner > Editor > Viewer > None.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveRole {
    /// Created the note; sole administrator.
    Owner,
    /// Member with edit rights.
    Editor,
    /// Member with read rights.
    Viewer,
    /// No relation to the note.
    None,
}

impl EffectiveRole {
    /// Ownership wins over any membership row.
    pub fn resolve(is_owner: bool, member_role: Option<NoteRole>) -> Self {
        if is_owner {
            return Self::Owner;
        }
        match member_role {
            Some(role) => role.into(),
            None => Self::None,
        }
    }

    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Owner => 3,
            Self::Editor => 2,
            Self::Viewer => 1,
            Self::None => 0,
        }
    }

    /// Read access: any role except `None`.
    pub fn can_read(&self) -> bool {
        self.privilege_level() >= 1
    }

    /// Content edits: owner or editor.
    pub fn can_edit_content(&self) -> bool {
        matches!(self, Self::Owner | Self::Editor)
    }

    /// Deletion, sharing, and member administration: owner only.
    pub fn can_administer(&self) -> bool {
        matches!(self, Self::Owner)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
            Self::None => "none",
        }
    }
}

impl From<NoteRole> for EffectiveRole {
    fn from(role: NoteRole) -> Self {
        match role {
            NoteRole::Editor => Self::Editor,
            NoteRole::Viewer => Self::Viewer,
        }
    }
}

impl fmt::Display for EffectiveRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
