//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::role::UserRole;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Optional display name.
    pub name: Option<String>,
    /// Email address, unique without regard to case.
    pub email: String,
    /// Argon2id password hash in PHC string format.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Account role tag.
    pub role: UserRole,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the given address belongs to this account, ignoring case.
    ///
    /// Folds case the way PostgreSQL `LOWER()` does, so non-ASCII letters
    /// compare equal to their other case too.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().to_lowercase() == email.trim().to_lowercase()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address as entered.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name (optional).
    pub name: Option<String>,
    /// Assigned role.
    pub role: UserRole,
}
