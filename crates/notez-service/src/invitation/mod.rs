//! Invitation lifecycle: create, list, accept, decline.

pub mod service;

pub use service::{INVITATION_NOT_FOUND, InvitationOutcome, InvitationService, InviteRequest};
