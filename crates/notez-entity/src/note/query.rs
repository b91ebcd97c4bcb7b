//! Listing parameters for notes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use notez_core::AppError;
use notez_core::types::{PageRequest, SortDirection};

/// Sortable note columns. Only these map to SQL identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteSort {
    /// Sort by id.
    Id,
    /// Sort by title.
    Title,
    /// Sort by creation time.
    CreatedAt,
    /// Sort by last update.
    #[default]
    UpdatedAt,
}

impl NoteSort {
    /// The qualified column this field sorts on.
    pub fn as_column(&self) -> &'static str {
        match self {
            Self::Id => "n.id",
            Self::Title => "n.title",
            Self::CreatedAt => "n.created_at",
            Self::UpdatedAt => "n.updated_at",
        }
    }
}

impl FromStr for NoteSort {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            _ => Err(AppError::validation(
                "Sort must be one of 'id', 'title', 'created_at', 'updated_at'.",
            )),
        }
    }
}

/// Filter, sort, and page for listing a user's notes.
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
    /// Case-insensitive title substring.
    pub search: Option<String>,
    /// Sort column.
    pub sort: NoteSort,
    /// Sort direction.
    pub direction: SortDirection,
    /// Page window.
    pub page: PageRequest,
}
