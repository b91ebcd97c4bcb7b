//! Membership administration.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use notez_auth::acl::{AccessEvaluator, NoteAction};
use notez_core::error::AppError;
use notez_database::traits::MembershipStore;
use notez_entity::note::NoteRole;

use crate::context::RequestContext;

/// Message for a `(note, member)` pair with no membership.
pub const MEMBER_NOT_FOUND: &str = "Note or member not found.";

/// Changes and revokes memberships. The owner administers every member;
/// a member may only remove themselves.
#[derive(Debug, Clone)]
pub struct MemberService {
    memberships: Arc<dyn MembershipStore>,
    access: Arc<AccessEvaluator>,
}

impl MemberService {
    /// Creates a new member service.
    pub fn new(memberships: Arc<dyn MembershipStore>, access: Arc<AccessEvaluator>) -> Self {
        Self {
            memberships,
            access,
        }
    }

    /// Changes a member's role. Owner only.
    pub async fn update_role(
        &self,
        ctx: &RequestContext,
        note_id: Uuid,
        member_id: Uuid,
        role: NoteRole,
    ) -> Result<(), AppError> {
        self.access
            .authorize(ctx.user_id(), note_id, NoteAction::Administer)
            .await?;
        if !self.memberships.update_role(note_id, member_id, role).await? {
            return Err(AppError::not_found(MEMBER_NOT_FOUND));
        }
        info!(note_id = %note_id, member_id = %member_id, role = %role, "Member role updated");
        Ok(())
    }

    /// Removes a member from a note.
    pub async fn remove(
        &self,
        ctx: &RequestContext,
        note_id: Uuid,
        member_id: Uuid,
    ) -> Result<(), AppError> {
        let action = if member_id == ctx.user_id() {
            NoteAction::Read
        } else {
            NoteAction::Administer
        };
        self.access.authorize(ctx.user_id(), note_id, action).await?;

        if !self.memberships.remove(note_id, member_id).await? {
            return Err(AppError::not_found(MEMBER_NOT_FOUND));
        }
        info!(
            note_id = %note_id,
            member_id = %member_id,
            removed_by = %ctx.user_id(),
            "Member removed"
        );
        Ok(())
    }
}
