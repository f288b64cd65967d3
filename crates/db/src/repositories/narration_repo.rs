//! Repository for the `narrations` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::narration::Narration;

const COLUMNS: &str = "id, story_id, voice_profile_id, provider_voice_id, status, audio_path, \
                       duration_secs, failure_reason, created_at";

/// Provides insert/update/lookup for narrations.
pub struct NarrationRepo;

impl NarrationRepo {
    /// Insert a `pending` narration row, returning it.
    pub async fn create(
        pool: &PgPool,
        story_id: DbId,
        voice_profile_id: Option<DbId>,
        provider_voice_id: &str,
    ) -> Result<Narration, sqlx::Error> {
        let query = format!(
            "INSERT INTO narrations (story_id, voice_profile_id, provider_voice_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Narration>(&query)
            .bind(story_id)
            .bind(voice_profile_id)
            .bind(provider_voice_id)
            .fetch_one(pool)
            .await
    }

    /// Mark a narration completed with its stored audio location.
    pub async fn mark_completed(
        pool: &PgPool,
        id: DbId,
        audio_path: &str,
        duration_secs: Option<f64>,
    ) -> Result<Option<Narration>, sqlx::Error> {
        let query = format!(
            "UPDATE narrations SET
                status = 'completed',
                audio_path = $2,
                duration_secs = $3,
                failure_reason = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Narration>(&query)
            .bind(id)
            .bind(audio_path)
            .bind(duration_secs)
            .fetch_optional(pool)
            .await
    }

    /// Mark a narration failed with the error text.
    pub async fn mark_failed(
        pool: &PgPool,
        id: DbId,
        reason: &str,
    ) -> Result<Option<Narration>, sqlx::Error> {
        let query = format!(
            "UPDATE narrations SET status = 'failed', failure_reason = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Narration>(&query)
            .bind(id)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// List narrations for a story, newest first.
    pub async fn list_for_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<Narration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM narrations
             WHERE story_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Narration>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }
}
