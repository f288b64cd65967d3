//! Repository for the `story_shares` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::share::StoryShare;

const COLUMNS: &str = "id, story_id, user_id, share_role, created_at";

/// Provides CRUD operations for story shares.
pub struct ShareRepo;

impl ShareRepo {
    /// Insert or update a share, returning the row.
    ///
    /// Re-sharing with a different role updates the existing row.
    pub async fn upsert(
        pool: &PgPool,
        story_id: DbId,
        user_id: DbId,
        share_role: &str,
    ) -> Result<StoryShare, sqlx::Error> {
        let query = format!(
            "INSERT INTO story_shares (story_id, user_id, share_role)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_story_shares_story_user
             DO UPDATE SET share_role = EXCLUDED.share_role
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryShare>(&query)
            .bind(story_id)
            .bind(user_id)
            .bind(share_role)
            .fetch_one(pool)
            .await
    }

    /// List shares for a story.
    pub async fn list_for_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<StoryShare>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_shares WHERE story_id = $1 ORDER BY created_at"
        );
        sqlx::query_as::<_, StoryShare>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch the share row for a specific user on a story, if any.
    pub async fn find(
        pool: &PgPool,
        story_id: DbId,
        user_id: DbId,
    ) -> Result<Option<StoryShare>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_shares WHERE story_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, StoryShare>(&query)
            .bind(story_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Remove a share. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, story_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM story_shares WHERE story_id = $1 AND user_id = $2")
                .bind(story_id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
