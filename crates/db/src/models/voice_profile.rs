//! Voice profile entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storyweave_core::types::{DbId, Timestamp};

/// A row from the `voice_profiles` table.
///
/// `status` moves `pending -> training -> completed | failed`; transitions
/// are validated by `storyweave_core::status`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VoiceProfile {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    /// The vendor-side voice id, set once training completes.
    pub provider_voice_id: Option<String>,
    pub status: String,
    pub failure_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a voice profile.
#[derive(Debug, Deserialize)]
pub struct CreateVoiceProfile {
    pub name: String,
}
