//! Invitation service.
//!
//! An invitation is pending from creation until the invited user either
//! declines it (the row is deleted) or accepts it (the row is deleted and a
//! membership granted in one transaction). No row survives either outcome.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use notez_auth::acl::{AccessEvaluator, NoteAction};
use notez_core::error::AppError;
use notez_database::traits::{ALREADY_INVITED, InvitationStore, MembershipStore, UserStore};
use notez_entity::invitation::{CreateInvitation, Invitation, InvitationView};
use notez_entity::note::NoteRole;

use crate::context::RequestContext;

/// Message for an invitation that is absent or addressed to someone else.
/// Message for an invitation addressed to its sender.
pub const SELF_INVITE: &str = "You can't invite yourself.";
pub const INVITATION_NOT_FOUND: &str = "Invitation not found.";

/// Input for inviting a user to a note.
#[derive(Debug, Clone)]
pub struct InviteRequest {
    /// Email of the user to invite.
    pub email: String,
    /// Note to share.
    pub note_id: Uuid,
    /// Proposed role.
    pub role: NoteRole,
}

/// How the invited user answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationOutcome {
    /// Membership granted.
    Accepted,
    /// Invitation discarded.
    Declined,
}

impl InvitationOutcome {
    /// Human-readable confirmation.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Accepted => "Invitation accepted.",
            Self::Declined => "Invitation declined.",
        }
    }
}

/// Drives invitations through their lifecycle.
#[derive(Debug, Clone)]
pub struct InvitationService {
    users: Arc<dyn UserStore>,
    memberships: Arc<dyn MembershipStore>,
    invitations: Arc<dyn InvitationStore>,
    access: Arc<AccessEvaluator>,
}

impl InvitationService {
    /// Creates a new invitation service.
    pub fn new(
        users: Arc<dyn UserStore>,
        memberships: Arc<dyn MembershipStore>,
        invitations: Arc<dyn InvitationStore>,
        access: Arc<AccessEvaluator>,
    ) -> Self {
        Self {
            users,
            memberships,
            invitations,
            access,
        }
    }

    /// Invites a user to a note owned by the caller.
    ///
    /// Preconditions are read first so each failure carries a precise
    /// message. The unique `(note_id, user_id)` constraint still decides
    /// races between the check and the insert.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: InviteRequest,
    ) -> Result<Invitation, AppError> {
        if ctx.user.has_email(&req.email) {
            return Err(AppError::bad_request(SELF_INVITE));
        }

        // Only the owner passes, so the target can no longer be the owner.
        self.access
            .authorize(ctx.user_id(), req.note_id, NoteAction::Administer)
            .await?;

        let target = self
            .users
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("User with email '{}' not found.", req.email))
            })?;
        // The store's case folding is authoritative; catch what the string
        // comparison above could not.
        if target.id == ctx.user_id() {
            return Err(AppError::bad_request(SELF_INVITE));
        }

        if self
            .memberships
            .find(req.note_id, target.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("User is already a member of this note."));
        }
        if self.invitations.exists_for(req.note_id, target.id).await? {
            return Err(AppError::conflict(ALREADY_INVITED));
        }

        let invitation = self
            .invitations
            .create(&CreateInvitation {
                note_id: req.note_id,
                user_id: target.id,
                inviter_id: ctx.user_id(),
                role: req.role,
            })
            .await?;

        info!(
            invitation_id = %invitation.id,
            note_id = %invitation.note_id,
            inviter_id = %invitation.inviter_id,
            user_id = %invitation.user_id,
            role = %invitation.role,
            "Invitation created"
        );
        Ok(invitation)
    }

    /// Pending invitations addressed to the caller.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<InvitationView>, AppError> {
        self.invitations.list_for_user(ctx.user_id()).await
    }

    /// Accepts or declines an invitation addressed to the caller.
    ///
    /// Declining something that is already gone succeeds. Accepting it is
    /// `NotFound`, as is losing a race with a concurrent accept.
    pub async fn respond(
        &self,
        ctx: &RequestContext,
        invitation_id: Uuid,
        accept: bool,
    ) -> Result<InvitationOutcome, AppError> {
        if !accept {
            let existed = self
                .invitations
                .decline(invitation_id, ctx.user_id())
                .await?;
            if existed {
                info!(invitation_id = %invitation_id, user_id = %ctx.user_id(), "Invitation declined");
            }
            return Ok(InvitationOutcome::Declined);
        }

        let invitation = self
            .invitations
            .find_for_user(invitation_id, ctx.user_id())
            .await?
            .ok_or_else(|| AppError::not_found(INVITATION_NOT_FOUND))?;

        let granted = self
            .invitations
            .accept(invitation.note_id, ctx.user_id(), invitation.role)
            .await?;
        if !granted {
            return Err(AppError::not_found(INVITATION_NOT_FOUND));
        }

        info!(
            invitation_id = %invitation.id,
            note_id = %invitation.note_id,
            user_id = %ctx.user_id(),
            role = %invitation.role,
            "Invitation accepted"
        );
        Ok(InvitationOutcome::Accepted)
    }
}
