//! # notez-service
//!
//! Business logic service layer for Notez. Each service orchestrates the
//! storage traits and the auth primitives to implement one group of use
//! cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod auth;
pub mod context;
pub mod invitation;
pub mod membership;
pub mod note;
pub mod profile;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{AuthService, LoginResult, RegisterRequest};
pub use context::RequestContext;
pub use invitation::{InvitationOutcome, InvitationService, InviteRequest};
pub use membership::MemberService;
pub use note::{NoteInput, NoteService};
pub use profile::{ChangePasswordRequest, ProfileService};
