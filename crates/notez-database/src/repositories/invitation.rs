//! Invitation repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use notez_core::error::{AppError, ErrorKind};
use notez_core::result::AppResult;
use notez_entity::invitation::{CreateInvitation, Invitation, InvitationRow, InvitationView};
use notez_entity::note::NoteRole;

use super::unique_or_database;
use crate::traits::{ALREADY_INVITED, InvitationStore};

/// PostgreSQL invitation store over `note_invitations`.
#[derive(Debug, Clone)]
pub struct InvitationRepository {
    pool: PgPool,
}

impl InvitationRepository {
    /// Create a new invitation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationStore for InvitationRepository {
    async fn create(&self, data: &CreateInvitation) -> AppResult<Invitation> {
        sqlx::query_as::<_, Invitation>(
            "INSERT INTO note_invitations (id, note_id, user_id, inviter_id, role) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.note_id)
        .bind(data.user_id)
        .bind(data.inviter_id)
        .bind(data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| unique_or_database(e, ALREADY_INVITED, "Failed to create invitation"))
    }

    async fn exists_for(&self, note_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM note_invitations WHERE note_id = $1 AND user_id = $2)",
        )
        .bind(note_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check invitation", e))
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<InvitationView>> {
        let rows = sqlx::query_as::<_, InvitationRow>(
            "SELECT ni.id, ni.note_id, n.title AS note_title, ni.inviter_id, \
                    i.email AS inviter_email, i.name AS inviter_name, ni.role, ni.created_at \
             FROM note_invitations ni \
             JOIN notes n ON n.id = ni.note_id \
             JOIN users i ON i.id = ni.inviter_id \
             WHERE ni.user_id = $1 \
             ORDER BY ni.created_at DESC, ni.id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list invitations", e))?;

        Ok(rows.into_iter().map(InvitationView::from).collect())
    }

    async fn find_for_user(&self, id: Uuid, user_id: Uuid) -> AppResult<Option<Invitation>> {
        sqlx::query_as::<_, Invitation>(
            "SELECT * FROM note_invitations WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invitation", e))
    }

    async fn decline(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM note_invitations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete invitation", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn accept(&self, note_id: Uuid, user_id: Uuid, role: NoteRole) -> AppResult<bool> {
        // Dropping `tx` on any early return rolls it back.
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let deleted =
            sqlx::query("DELETE FROM note_invitations WHERE note_id = $1 AND user_id = $2")
                .bind(note_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to consume invitation", e)
                })?
                .rows_affected();

        if deleted == 0 {
            debug!(note_id = %note_id, user_id = %user_id, "Invitation already consumed");
            tx.rollback().await.map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to roll back transaction", e)
            })?;
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO notes_users (note_id, user_id, role) VALUES ($1, $2, $3) \
             ON CONFLICT (note_id, user_id) DO UPDATE SET role = EXCLUDED.role",
        )
        .bind(note_id)
        .bind(user_id)
        .bind(role)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to grant membership", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit invitation accept", e)
        })?;

        Ok(true)
    }
}
