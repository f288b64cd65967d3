//! Repository for the `stories` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::story::{CreateStory, Story, UpdateStory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, owner_id, title, body, source, language, deleted_at, created_at, updated_at";

/// Provides CRUD operations for stories.
pub struct StoryRepo;

impl StoryRepo {
    /// Insert a new story, returning the created row.
    ///
    /// `source` defaults to `written`, `language` to `en`.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateStory,
    ) -> Result<Story, sqlx::Error> {
        let query = format!(
            "INSERT INTO stories (owner_id, title, body, source, language)
             VALUES ($1, $2, $3, COALESCE($4, 'written'), COALESCE($5, 'en'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(owner_id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.source)
            .bind(&input.language)
            .fetch_one(pool)
            .await
    }

    /// Find a story by its internal ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Story>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List stories the user owns or has been shared, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Story>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories
             WHERE deleted_at IS NULL
               AND (owner_id = $1
                    OR id IN (SELECT story_id FROM story_shares WHERE user_id = $1))
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a story. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStory,
    ) -> Result<Option<Story>, sqlx::Error> {
        let query = format!(
            "UPDATE stories SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                language = COALESCE($4, language),
                updated_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(&input.language)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a story by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE stories SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
