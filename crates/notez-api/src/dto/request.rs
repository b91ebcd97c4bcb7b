//! Request DTOs with validation.
//!
//! Every body type derives `Validate`; [`ValidatedJson`](crate::extractors::ValidatedJson)
//! runs the rules before a handler sees the value.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use notez_core::types::{PageRequest, SortDirection};
use notez_entity::note::{NoteQuery, NoteRole, NoteSort};
use notez_service::{ChangePasswordRequest, InviteRequest, NoteInput, RegisterRequest};

/// Upper bound on note content, in bytes.
pub const MAX_CONTENT_BYTES: usize = 5 * 1024 * 1024;

fn content_size(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.len() > MAX_CONTENT_BYTES {
        return Err(ValidationError::new("content_size")
            .with_message("Content must be between 1 byte and 5 MiB.".into()));
    }
    Ok(())
}

fn note_role(value: &str) -> Result<(), ValidationError> {
    NoteRole::from_str(value).map(|_| ()).map_err(|e| {
        ValidationError::new("role").with_message(e.message.into())
    })
}

fn note_sort(value: &str) -> Result<(), ValidationError> {
    NoteSort::from_str(value).map(|_| ()).map_err(|e| {
        ValidationError::new("sort").with_message(e.message.into())
    })
}

fn sort_direction(value: &str) -> Result<(), ValidationError> {
    SortDirection::from_str(value).map(|_| ()).map_err(|e| {
        ValidationError::new("order").with_message(e.message.into())
    })
}

/// Registration body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterBody {
    /// Email address.
    #[validate(email(message = "Invalid email."))]
    pub email: String,
    /// Password. Length and character rules come from `auth` config
    /// and are applied by the service.
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
    /// Password confirmation.
    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub confirm_password: String,
    /// Display name.
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub name: Option<String>,
}

impl From<RegisterBody> for RegisterRequest {
    fn from(body: RegisterBody) -> Self {
        Self {
            email: body.email,
            password: body.password,
            confirm_password: body.confirm_password,
            name: body.name,
        }
    }
}

/// Login body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginBody {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required."))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Display name change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateNameBody {
    /// New display name; `null` or blank clears it.
    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub name: Option<String>,
}

/// Email change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateEmailBody {
    /// New email address.
    #[validate(email(message = "Invalid email."))]
    pub email: String,
}

/// Password change.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePasswordBody {
    /// Password in use now.
    #[validate(length(min = 1, message = "Current password is required."))]
    pub current_password: String,
    /// New password, checked against the configured policy by the service.
    #[validate(length(min = 1, message = "New password is required."))]
    pub password: String,
    /// New password confirmation.
    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub confirm_password: String,
}

impl From<UpdatePasswordBody> for ChangePasswordRequest {
    fn from(body: UpdatePasswordBody) -> Self {
        Self {
            current_password: body.current_password,
            password: body.password,
            confirm_password: body.confirm_password,
        }
    }
}

/// Note create or replace body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NoteBody {
    /// Title.
    #[validate(length(min = 1, max = 300, message = "Title must be between 1 and 300 characters."))]
    pub title: String,
    /// Body.
    #[validate(custom(function = "content_size"))]
    pub content: Option<String>,
}

impl From<NoteBody> for NoteInput {
    fn from(body: NoteBody) -> Self {
        Self {
            title: body.title,
            content: body.content,
        }
    }
}

/// Invitation create body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvitationBody {
    /// Email of the user to invite.
    #[validate(email(message = "Invalid email."))]
    pub email: String,
    /// Note to share.
    pub note_id: Uuid,
    /// `editor` or `viewer`.
    #[validate(custom(function = "note_role"))]
    pub role: String,
}

impl CreateInvitationBody {
    /// Converts the validated body into a service request.
    pub fn into_request(self) -> Result<InviteRequest, notez_core::AppError> {
        Ok(InviteRequest {
            role: self.role.parse()?,
            email: self.email,
            note_id: self.note_id,
        })
    }
}

/// Answer to an invitation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RespondInvitationBody {
    /// `true` to accept, `false` to decline.
    pub accept: bool,
}

/// Member role change body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateMemberRoleBody {
    /// `editor` or `viewer`.
    #[validate(custom(function = "note_role"))]
    pub role: String,
}

/// Query string for listing notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NoteListParams {
    /// Case-insensitive title filter.
    #[validate(length(max = 300, message = "Search must be at most 300 characters."))]
    pub q: Option<String>,
    /// Page number, starting at 1.
    #[validate(range(min = 1, message = "Page must be at least 1."))]
    pub page: Option<u64>,
    /// Items per page.
    #[validate(range(min = 1, max = 100, message = "Page size must be between 1 and 100."))]
    pub page_size: Option<u64>,
    /// Sort column.
    #[validate(custom(function = "note_sort"))]
    pub sort: Option<String>,
    /// `asc` or `desc`.
    #[validate(custom(function = "sort_direction"))]
    pub order: Option<String>,
}

impl NoteListParams {
    /// Converts validated parameters into a store query.
    pub fn into_query(self) -> Result<NoteQuery, notez_core::AppError> {
        let defaults = PageRequest::default();
        Ok(NoteQuery {
            search: self.q,
            sort: self.sort.as_deref().map(str::parse).transpose()?.unwrap_or_default(),
            direction: self
                .order
                .as_deref()
                .map(str::parse)
                .transpose()?
                .unwrap_or_default(),
            page: PageRequest::new(
                self.page.unwrap_or(defaults.page),
                self.page_size.unwrap_or(defaults.page_size),
            ),
        })
    }
}
