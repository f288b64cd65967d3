//! Narration entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storyweave_core::types::{DbId, Timestamp};

/// A row from the `narrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Narration {
    pub id: DbId,
    pub story_id: DbId,
    /// Set when a cloned profile was used; `None` for stock voices.
    pub voice_profile_id: Option<DbId>,
    /// The vendor voice id the audio was synthesized with.
    pub provider_voice_id: String,
    pub status: String,
    pub audio_path: Option<String>,
    pub duration_secs: Option<f64>,
    pub failure_reason: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for requesting a narration.
///
/// Exactly one of `voice_profile_id` (a completed clone) or `voice_id`
/// (a stock vendor voice) must be provided; the handler validates this.
#[derive(Debug, Deserialize)]
pub struct CreateNarration {
    pub voice_profile_id: Option<DbId>,
    pub voice_id: Option<String>,
}
