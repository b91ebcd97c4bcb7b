//! Note repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use notez_core::error::{AppError, ErrorKind};
use notez_core::result::AppResult;
use notez_core::types::PageResponse;
use notez_entity::note::{CreateNote, Note, NoteAccess, NoteQuery, NoteWithRole, UpdateNote};

use super::escape_like;
use crate::traits::NoteStore;

/// Columns of a [`NoteAccess`] row for the user bound as `$1`.
const ACCESS_COLUMNS: &str = "n.id, n.user_id, n.title, n.content, n.created_at, n.updated_at, \
     n.user_id = $1 AS is_owner, nu.role AS member_role";

/// PostgreSQL note store.
#[derive(Debug, Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    /// Create a new note repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteStore for NoteRepository {
    async fn create(&self, data: &CreateNote) -> AppResult<Note> {
        sqlx::query_as::<_, Note>(
            "INSERT INTO notes (id, user_id, title, content) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(data.owner_id)
        .bind(&data.title)
        .bind(&data.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create note", e))
    }

    async fn find_access(&self, note_id: Uuid, user_id: Uuid) -> AppResult<Option<NoteAccess>> {
        let sql = format!(
            "SELECT {ACCESS_COLUMNS} FROM notes n \
             LEFT JOIN notes_users nu ON nu.note_id = n.id AND nu.user_id = $1 \
             WHERE n.id = $2"
        );
        sqlx::query_as::<_, NoteAccess>(&sql)
            .bind(user_id)
            .bind(note_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to evaluate note access", e)
            })
    }

    async fn list_accessible(
        &self,
        user_id: Uuid,
        query: &NoteQuery,
    ) -> AppResult<PageResponse<NoteWithRole>> {
        let mut conditions = vec!["(n.user_id = $1 OR nu.user_id IS NOT NULL)".to_string()];
        let mut param_idx = 2u32;

        let pattern = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));
        if pattern.is_some() {
            conditions.push(format!("n.title ILIKE ${param_idx}"));
            param_idx += 1;
        }

        let from_clause = format!(
            "FROM notes n \
             LEFT JOIN notes_users nu ON nu.note_id = n.id AND nu.user_id = $1 \
             WHERE {}",
            conditions.join(" AND ")
        );
        let direction = query.direction.as_sql();
        let count_sql = format!("SELECT COUNT(*) {from_clause}");
        let select_sql = format!(
            "SELECT {ACCESS_COLUMNS} {from_clause} \
             ORDER BY {} {direction}, n.id {direction} LIMIT ${param_idx} OFFSET ${}",
            query.sort.as_column(),
            param_idx + 1
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql).bind(user_id);
        let mut select_query = sqlx::query_as::<_, NoteAccess>(&select_sql).bind(user_id);
        if let Some(p) = &pattern {
            count_query = count_query.bind(p.clone());
            select_query = select_query.bind(p.clone());
        }

        let total = count_query.fetch_one(&self.pool).await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count notes", e)
        })?;

        let rows = select_query
            .bind(query.page.limit() as i64)
            .bind(query.page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notes", e))?;

        Ok(PageResponse::new(
            rows.into_iter().map(NoteWithRole::from).collect(),
            query.page,
            total as u64,
        ))
    }

    async fn update(&self, note_id: Uuid, data: &UpdateNote) -> AppResult<Option<Note>> {
        sqlx::query_as::<_, Note>(
            "UPDATE notes SET title = $2, content = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(note_id)
        .bind(&data.title)
        .bind(&data.content)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update note", e))
    }

    async fn delete(&self, note_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(note_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete note", e))?;
        Ok(result.rows_affected() > 0)
    }
}
