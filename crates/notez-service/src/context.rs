//! Request context carrying the authenticated user and session.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use notez_entity::session::SessionUser;
use notez_entity::user::User;

/// Context for the current authenticated request.
///
/// Built by the session extractor and passed into service methods so that
/// every operation knows *who* is acting and through *which* session.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user, as loaded with the session.
    pub user: User,
    /// The session token that authenticated this request.
    pub session_token: String,
    /// Expiry of that session.
    pub session_expires_at: DateTime<Utc>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context from a resolved session.
    pub fn new(resolved: SessionUser, session_token: String) -> Self {
        Self {
            user: resolved.user,
            session_token,
            session_expires_at: resolved.expires_at,
            request_time: Utc::now(),
        }
    }

    /// The authenticated user's ID.
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }
}
