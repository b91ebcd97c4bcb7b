//! Storage-access traits consumed by the service layer.
//!
//! Expected outcomes (absent row, nothing deleted) come back as `Option` or
//! `bool`. Only uniqueness violations are promoted to `Conflict`; every other
//! storage failure is a `Database` error.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use notez_core::result::AppResult;
use notez_core::types::PageResponse;
use notez_entity::invitation::{CreateInvitation, Invitation, InvitationView};
use notez_entity::note::{
    CreateNote, Membership, Note, NoteAccess, NoteQuery, NoteRole, NoteWithRole, UpdateNote,
};
use notez_entity::session::{Session, SessionUser};
use notez_entity::user::{CreateUser, User};

/// Message carried by the conflict raised on a duplicate email.
pub const EMAIL_TAKEN: &str = "Email already used.";
/// Message carried by the conflict raised on a duplicate invitation.
pub const ALREADY_INVITED: &str = "User already invited.";

/// Credential store.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a user. A case-insensitive duplicate email is a `Conflict`.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Replace the display name.
    async fn update_name(&self, id: Uuid, name: Option<&str>) -> AppResult<Option<User>>;

    /// Replace the email. A duplicate email is a `Conflict`.
    async fn update_email(&self, id: Uuid, email: &str) -> AppResult<Option<User>>;

    /// Replace the password hash.
    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<bool>;
}

/// Session rows keyed by their opaque token.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new session.
    async fn create(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Session>;

    /// Resolve a token to its user if the session expires strictly after `now`.
    async fn find_user(&self, token: &str, now: DateTime<Utc>) -> AppResult<Option<SessionUser>>;

    /// Delete a session. Returns whether a row existed.
    async fn delete(&self, token: &str) -> AppResult<bool>;

    /// Delete every session that expired at or before `now`.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;
}

/// Notes and the owner/membership join used for access evaluation.
#[async_trait]
pub trait NoteStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a note.
    async fn create(&self, data: &CreateNote) -> AppResult<Note>;

    /// Load a note with the given user's ownership flag and membership role
    /// in one read. `None` only when the note does not exist.
    async fn find_access(&self, note_id: Uuid, user_id: Uuid) -> AppResult<Option<NoteAccess>>;

    /// Page through notes the user owns or is a member of.
    async fn list_accessible(
        &self,
        user_id: Uuid,
        query: &NoteQuery,
    ) -> AppResult<PageResponse<NoteWithRole>>;

    /// Replace title and content.
    async fn update(&self, note_id: Uuid, data: &UpdateNote) -> AppResult<Option<Note>>;

    /// Delete a note with its memberships and invitations.
    async fn delete(&self, note_id: Uuid) -> AppResult<bool>;
}

/// Note memberships keyed by `(note_id, user_id)`.
#[async_trait]
pub trait MembershipStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a membership.
    async fn find(&self, note_id: Uuid, user_id: Uuid) -> AppResult<Option<Membership>>;

    /// Change a member's role. Returns whether the membership existed.
    async fn update_role(&self, note_id: Uuid, user_id: Uuid, role: NoteRole) -> AppResult<bool>;

    /// Remove a member. Returns whether the membership existed.
    async fn remove(&self, note_id: Uuid, user_id: Uuid) -> AppResult<bool>;
}

/// Pending invitations.
#[async_trait]
pub trait InvitationStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert an invitation. A second one for the same `(note, user)` pair
    /// is a `Conflict`.
    async fn create(&self, data: &CreateInvitation) -> AppResult<Invitation>;

    /// Whether an invitation is pending for the pair.
    async fn exists_for(&self, note_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Invitations addressed to the user, joined with note title and inviter.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<InvitationView>>;

    /// Find an invitation only if it is addressed to the user.
    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Invitation>>;

    /// Delete an invitation addressed to the user. Returns whether it existed.
    async fn decline(&self, id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Atomically delete the pending invitation for `(note_id, user_id)` and
    /// grant the membership. Returns `false`, with nothing changed, when no
    /// invitation remained to consume.
    async fn accept(&self, note_id: Uuid, user_id: Uuid, role: NoteRole) -> AppResult<bool>;
}
