//! Repository for the `video_jobs` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::video_job::VideoJob;

const COLUMNS: &str = "id, story_id, provider, provider_job_id, prompt, status, output_url, \
                       failure_reason, created_at, updated_at";

/// Provides insert/update/lookup for video render jobs.
pub struct VideoJobRepo;

impl VideoJobRepo {
    /// Insert a `pending` job row, returning it.
    pub async fn create(
        pool: &PgPool,
        story_id: DbId,
        prompt: &str,
    ) -> Result<VideoJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO video_jobs (story_id, prompt)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoJob>(&query)
            .bind(story_id)
            .bind(prompt)
            .fetch_one(pool)
            .await
    }

    /// Find a job by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VideoJob>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM video_jobs WHERE id = $1");
        sqlx::query_as::<_, VideoJob>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List jobs for a story, newest first.
    pub async fn list_for_story(
        pool: &PgPool,
        story_id: DbId,
    ) -> Result<Vec<VideoJob>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM video_jobs
             WHERE story_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, VideoJob>(&query)
            .bind(story_id)
            .fetch_all(pool)
            .await
    }

    /// Record vendor acceptance: which provider took the job and its job id.
    pub async fn mark_submitted(
        pool: &PgPool,
        id: DbId,
        provider: &str,
        provider_job_id: &str,
    ) -> Result<Option<VideoJob>, sqlx::Error> {
        let query = format!(
            "UPDATE video_jobs SET
                status = 'submitted',
                provider = $2,
                provider_job_id = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoJob>(&query)
            .bind(id)
            .bind(provider)
            .bind(provider_job_id)
            .fetch_optional(pool)
            .await
    }

    /// Record vendor completion with the rendered output URL.
    pub async fn mark_completed(
        pool: &PgPool,
        id: DbId,
        output_url: &str,
    ) -> Result<Option<VideoJob>, sqlx::Error> {
        let query = format!(
            "UPDATE video_jobs SET
                status = 'completed',
                output_url = $2,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoJob>(&query)
            .bind(id)
            .bind(output_url)
            .fetch_optional(pool)
            .await
    }

    /// Record failure with the reason text.
    pub async fn mark_failed(
        pool: &PgPool,
        id: DbId,
        reason: &str,
    ) -> Result<Option<VideoJob>, sqlx::Error> {
        let query = format!(
            "UPDATE video_jobs SET
                status = 'failed',
                failure_reason = $2,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VideoJob>(&query)
            .bind(id)
            .bind(reason)
            .fetch_optional(pool)
            .await
    }
}
