//! Video job entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storyweave_core::types::{DbId, Timestamp};

/// A row from the `video_jobs` table.
///
/// `provider` and `provider_job_id` are set when a vendor accepts the job;
/// `status` moves `pending -> submitted -> completed | failed`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VideoJob {
    pub id: DbId,
    pub story_id: DbId,
    pub provider: Option<String>,
    pub provider_job_id: Option<String>,
    pub prompt: String,
    pub status: String,
    pub output_url: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for requesting a video render.
#[derive(Debug, Deserialize)]
pub struct CreateVideoJob {
    /// Prompt for the generator; defaults to the latest analysis summary
    /// when omitted.
    pub prompt: Option<String>,
}
