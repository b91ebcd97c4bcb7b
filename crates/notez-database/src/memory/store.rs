//! In-memory store guarded by a single Tokio mutex.
//!
//! Mirrors the PostgreSQL schema: case-insensitive unique emails, one
//! invitation per `(note, user)`, cascading deletes from notes, and foreign
//! keys on every insert. Each trait method holds the lock for its whole
//! duration, so `accept` is atomic.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use notez_core::error::{AppError, ErrorKind};
use notez_core::result::AppResult;
use notez_core::types::{PageResponse, SortDirection};
use notez_entity::invitation::{CreateInvitation, Invitation, InvitationView, InvitedNote, Inviter};
use notez_entity::note::{
    CreateNote, Membership, Note, NoteAccess, NoteQuery, NoteRole, NoteSort, NoteWithRole,
    UpdateNote,
};
use notez_entity::session::{Session, SessionUser};
use notez_entity::user::{CreateUser, User};

use crate::traits::{
    ALREADY_INVITED, EMAIL_TAKEN, InvitationStore, MembershipStore, NoteStore, SessionStore,
    UserStore,
};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    sessions: HashMap<String, Session>,
    notes: HashMap<Uuid, Note>,
    memberships: HashMap<(Uuid, Uuid), Membership>,
    invitations: HashMap<Uuid, Invitation>,
    fail_next_grant: bool,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != except && u.has_email(email))
    }

    fn access(&self, note: &Note, user_id: Uuid) -> NoteAccess {
        NoteAccess {
            note: note.clone(),
            is_owner: note.user_id == user_id,
            member_role: self.memberships.get(&(note.id, user_id)).map(|m| m.role),
        }
    }
}

fn foreign_key(what: &str) -> AppError {
    AppError::database(format!("Foreign key violation: {what} does not exist"))
}

/// In-memory storage backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the membership insert of the next `accept` fail after the
    /// invitation delete, exercising rollback.
    #[cfg(any(test, feature = "test-util"))]
    pub async fn fail_next_grant(&self) {
        self.state.lock().await.fail_next_grant = true;
    }

    /// Number of membership rows for a note.
    #[cfg(any(test, feature = "test-util"))]
    pub async fn membership_count(&self, note_id: Uuid) -> usize {
        let state = self.state.lock().await;
        state.memberships.keys().filter(|(n, _)| *n == note_id).count()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.has_email(email)).cloned())
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;
        if state.email_taken(&data.email, None) {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name: data.name.clone(),
            email: data.email.trim().to_string(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_name(&self, id: Uuid, name: Option<&str>) -> AppResult<Option<User>> {
        let mut state = self.state.lock().await;
        Ok(state.users.get_mut(&id).map(|user| {
            user.name = name.map(str::to_string);
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn update_email(&self, id: Uuid, email: &str) -> AppResult<Option<User>> {
        let mut state = self.state.lock().await;
        if state.email_taken(email, Some(id)) {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }
        Ok(state.users.get_mut(&id).map(|user| {
            user.email = email.trim().to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state.users.get_mut(&id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn create(
        &self,
        token: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> AppResult<Session> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&user_id) {
            return Err(foreign_key("user"));
        }
        if state.sessions.contains_key(token) {
            return Err(AppError::database("Duplicate session token"));
        }
        let session = Session {
            id: token.to_string(),
            user_id,
            expires_at,
            created_at: Utc::now(),
        };
        state.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn find_user(&self, token: &str, now: DateTime<Utc>) -> AppResult<Option<SessionUser>> {
        let state = self.state.lock().await;
        Ok(state
            .sessions
            .get(token)
            .filter(|s| !s.is_expired_at(now))
            .and_then(|s| {
                state.users.get(&s.user_id).map(|user| SessionUser {
                    user: user.clone(),
                    expires_at: s.expires_at,
                })
            }))
    }

    async fn delete(&self, token: &str) -> AppResult<bool> {
        Ok(self.state.lock().await.sessions.remove(token).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut state = self.state.lock().await;
        let before = state.sessions.len();
        state.sessions.retain(|_, s| !s.is_expired_at(now));
        Ok((before - state.sessions.len()) as u64)
    }
}

fn compare_notes(a: &Note, b: &Note, sort: NoteSort) -> Ordering {
    let primary = match sort {
        NoteSort::Id => Ordering::Equal,
        NoteSort::Title => a.title.cmp(&b.title),
        NoteSort::CreatedAt => a.created_at.cmp(&b.created_at),
        NoteSort::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn create(&self, data: &CreateNote) -> AppResult<Note> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&data.owner_id) {
            return Err(foreign_key("user"));
        }
        let now = Utc::now();
        let note = Note {
            id: Uuid::now_v7(),
            user_id: data.owner_id,
            title: data.title.clone(),
            content: data.content.clone(),
            created_at: now,
            updated_at: now,
        };
        state.notes.insert(note.id, note.clone());
        Ok(note)
    }

    async fn find_access(&self, note_id: Uuid, user_id: Uuid) -> AppResult<Option<NoteAccess>> {
        let state = self.state.lock().await;
        Ok(state.notes.get(&note_id).map(|n| state.access(n, user_id)))
    }

    async fn list_accessible(
        &self,
        user_id: Uuid,
        query: &NoteQuery,
    ) -> AppResult<PageResponse<NoteWithRole>> {
        let state = self.state.lock().await;
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut visible: Vec<NoteAccess> = state
            .notes
            .values()
            .map(|n| state.access(n, user_id))
            .filter(|a| a.role().can_read())
            .filter(|a| match &needle {
                Some(needle) => a.note.title.to_lowercase().contains(needle),
                None => true,
            })
            .collect();

        visible.sort_by(|a, b| {
            let ord = compare_notes(&a.note, &b.note, query.sort);
            match query.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let total = visible.len() as u64;
        let items = visible
            .into_iter()
            .skip(query.page.offset() as usize)
            .take(query.page.limit() as usize)
            .map(NoteWithRole::from)
            .collect();

        Ok(PageResponse::new(items, query.page, total))
    }

    async fn update(&self, note_id: Uuid, data: &UpdateNote) -> AppResult<Option<Note>> {
        let mut state = self.state.lock().await;
        Ok(state.notes.get_mut(&note_id).map(|note| {
            note.title = data.title.clone();
            note.content = data.content.clone();
            note.updated_at = Utc::now();
            note.clone()
        }))
    }

    async fn delete(&self, note_id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if state.notes.remove(&note_id).is_none() {
            return Ok(false);
        }
        state.memberships.retain(|(n, _), _| *n != note_id);
        state.invitations.retain(|_, i| i.note_id != note_id);
        Ok(true)
    }
}

#[async_trait]
impl MembershipStore for MemoryStore {
    async fn find(&self, note_id: Uuid, user_id: Uuid) -> AppResult<Option<Membership>> {
        let state = self.state.lock().await;
        Ok(state.memberships.get(&(note_id, user_id)).cloned())
    }

    async fn update_role(&self, note_id: Uuid, user_id: Uuid, role: NoteRole) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        match state.memberships.get_mut(&(note_id, user_id)) {
            Some(membership) => {
                membership.role = role;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, note_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        Ok(state.memberships.remove(&(note_id, user_id)).is_some())
    }
}

#[async_trait]
impl InvitationStore for MemoryStore {
    async fn create(&self, data: &CreateInvitation) -> AppResult<Invitation> {
        let mut state = self.state.lock().await;
        if !state.notes.contains_key(&data.note_id) {
            return Err(foreign_key("note"));
        }
        if !state.users.contains_key(&data.user_id) || !state.users.contains_key(&data.inviter_id)
        {
            return Err(foreign_key("user"));
        }
        if data.user_id == data.inviter_id {
            return Err(AppError::database("Check violation: self-invitation"));
        }
        let duplicate = state
            .invitations
            .values()
            .any(|i| i.note_id == data.note_id && i.user_id == data.user_id);
        if duplicate {
            return Err(AppError::conflict(ALREADY_INVITED));
        }
        let invitation = Invitation {
            id: Uuid::now_v7(),
            note_id: data.note_id,
            user_id: data.user_id,
            inviter_id: data.inviter_id,
            role: data.role,
            created_at: Utc::now(),
        };
        state.invitations.insert(invitation.id, invitation.clone());
        Ok(invitation)
    }

    async fn exists_for(&self, note_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let state = self.state.lock().await;
        Ok(state
            .invitations
            .values()
            .any(|i| i.note_id == note_id && i.user_id == user_id))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<InvitationView>> {
        let state = self.state.lock().await;
        let mut pending: Vec<&Invitation> = state
            .invitations
            .values()
            .filter(|i| i.user_id == user_id)
            .collect();
        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(pending
            .into_iter()
            .filter_map(|i| {
                let note = state.notes.get(&i.note_id)?;
                let inviter = state.users.get(&i.inviter_id)?;
                Some(InvitationView {
                    id: i.id,
                    note: InvitedNote {
                        id: note.id,
                        title: note.title.clone(),
                    },
                    inviter: Inviter {
                        id: inviter.id,
                        email: inviter.email.clone(),
                        name: inviter.name.clone(),
                    },
                    role: i.role,
                    created_at: i.created_at,
                })
            })
            .collect())
    }

    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Invitation>> {
        let state = self.state.lock().await;
        Ok(state
            .invitations
            .get(&id)
            .filter(|i| i.user_id == user_id)
            .cloned())
    }

    async fn decline(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let addressed = state
            .invitations
            .get(&id)
            .is_some_and(|i| i.user_id == user_id);
        if addressed {
            state.invitations.remove(&id);
        }
        Ok(addressed)
    }

    async fn accept(&self, note_id: Uuid, user_id: Uuid, role: NoteRole) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        let pending = state
            .invitations
            .values()
            .find(|i| i.note_id == note_id && i.user_id == user_id)
            .map(|i| i.id);
        let Some(invitation_id) = pending else {
            return Ok(false);
        };

        // Validate the grant before touching anything so a failure leaves
        // the invitation in place.
        if !state.notes.contains_key(&note_id) {
            return Err(foreign_key("note"));
        }
        if !state.users.contains_key(&user_id) {
            return Err(foreign_key("user"));
        }
        if state.fail_next_grant {
            state.fail_next_grant = false;
            return Err(AppError::new(
                ErrorKind::Database,
                "Failed to grant membership",
            ));
        }

        state.invitations.remove(&invitation_id);
        let created_at = state
            .memberships
            .get(&(note_id, user_id))
            .map(|m| m.created_at)
            .unwrap_or_else(Utc::now);
        state.memberships.insert(
            (note_id, user_id),
            Membership {
                note_id,
                user_id,
                role,
                created_at,
            },
        );
        Ok(true)
    }
}
