//! Session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::User;

/// A bearer credential. The opaque token is the primary key.
///
/// Sessions are never renewed; once `expires_at` has passed the row is
/// inert until an external sweep deletes it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Session {
    /// Opaque token handed to the client.
    #[serde(skip_serializing)]
    pub id: String,
    /// The user this session belongs to.
    pub user_id: Uuid,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// When the session was issued.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session is expired at the given instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// A live session joined with its owner.
#[derive(Debug, Clone, FromRow)]
pub struct SessionUser {
    /// The authenticated user.
    #[sqlx(flatten)]
    pub user: User,
    /// Expiry of the session that authenticated the user.
    pub expires_at: DateTime<Utc>,
}
