//! Membership repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use notez_core::error::{AppError, ErrorKind};
use notez_core::result::AppResult;
use notez_entity::note::{Membership, NoteRole};

use crate::traits::MembershipStore;

/// PostgreSQL membership store over `notes_users`.
#[derive(Debug, Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    /// Create a new membership repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipStore for MembershipRepository {
    async fn find(&self, note_id: Uuid, user_id: Uuid) -> AppResult<Option<Membership>> {
        sqlx::query_as::<_, Membership>(
            "SELECT * FROM notes_users WHERE note_id = $1 AND user_id = $2",
        )
        .bind(note_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find membership", e))
    }

    async fn update_role(&self, note_id: Uuid, user_id: Uuid, role: NoteRole) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE notes_users SET role = $3 WHERE note_id = $1 AND user_id = $2")
                .bind(note_id)
                .bind(user_id)
                .bind(role)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update member role", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, note_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notes_users WHERE note_id = $1 AND user_id = $2")
            .bind(note_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove member", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
