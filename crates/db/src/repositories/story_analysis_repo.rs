//! Repository for the `story_analyses` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::story_analysis::StoryAnalysisRow;

const COLUMNS: &str = "id, story_id, model, characters, emotions, summary, created_at";

/// Provides insert/lookup for story analyses.
pub struct StoryAnalysisRepo;

impl StoryAnalysisRepo {
    /// Insert an analysis result, returning the created row.
    pub async fn create(
        pool: &PgPool,
        story_id: DbId,
        model: &str,
        characters: &serde_json::Value,
        emotions: &serde_json::Value,
        summary: &str,
    ) -> Result<StoryAnalysisRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO story_analyses (story_id, model, characters, emotions, summary)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StoryAnalysisRow>(&query)
            .bind(story_id)
            .bind(model)
            .bind(characters)
            .bind(emotions)
            .bind(summary)
            .fetch_one(pool)
            .await
    }

    /// Fetch the most recent analysis for a story.
    pub async fn latest_for_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Option<StoryAnalysisRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM story_analyses
             WHERE story_id = $1
             ORDER BY created_at DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, StoryAnalysisRow>(&query)
            .bind(story_id)
            .fetch_optional(pool)
            .await
    }
}
