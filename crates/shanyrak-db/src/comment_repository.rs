use chrono::{DateTime, Utc};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use shanyrak_core::error::AppError;
use shanyrak_core::models::Comment;
use shanyrak_core::traits::CommentStore;

use crate::db_error;

/// Repository for listing comments in PostgreSQL.
#[derive(Clone)]
pub struct CommentRepository {
    pool: Pool<Postgres>,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        listing_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Comment, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (content, user_id, shanyrak_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, created_at, user_id, shanyrak_id
            "#,
        )
        .bind(content)
        .bind(author_id)
        .bind(listing_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.into())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Comment>, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, content, created_at, user_id, shanyrak_id
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    /// All comments on a listing, oldest first.
    pub async fn list_for_listing(&self, listing_id: Uuid) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, content, created_at, user_id, shanyrak_id
            FROM comments
            WHERE shanyrak_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(listing_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Option<Comment>, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET content = $3
            WHERE id = $1 AND user_id = $2
            RETURNING id, content, created_at, user_id, shanyrak_id
            "#,
        )
        .bind(id)
        .bind(author_id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(row.map(Into::into))
    }

    pub async fn delete(&self, id: Uuid, author_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    user_id: Uuid,
    shanyrak_id: Uuid,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
            author_id: row.user_id,
            listing_id: row.shanyrak_id,
        }
    }
}

// -- Trait implementation --

impl CommentStore for CommentRepository {
    async fn create(
        &self,
        listing_id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Comment, AppError> {
        CommentRepository::create(self, listing_id, author_id, content).await
    }

    async fn get(&self, id: Uuid) -> Result<Option<Comment>, AppError> {
        CommentRepository::get(self, id).await
    }

    async fn list_for_listing(&self, listing_id: Uuid) -> Result<Vec<Comment>, AppError> {
        CommentRepository::list_for_listing(self, listing_id).await
    }

    async fn update(
        &self,
        id: Uuid,
        author_id: Uuid,
        content: &str,
    ) -> Result<Option<Comment>, AppError> {
        CommentRepository::update(self, id, author_id, content).await
    }

    async fn delete(&self, id: Uuid, author_id: Uuid) -> Result<bool, AppError> {
        CommentRepository::delete(self, id, author_id).await
    }
}
