//! Story share entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storyweave_core::types::{DbId, Timestamp};

/// A row from the `story_shares` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoryShare {
    pub id: DbId,
    pub story_id: DbId,
    pub user_id: DbId,
    /// `"viewer"` or `"editor"`; validated by `storyweave_core::sharing`.
    pub share_role: String,
    pub created_at: Timestamp,
}

/// DTO for creating a share.
#[derive(Debug, Deserialize)]
pub struct CreateShare {
    pub user_id: DbId,
    pub share_role: Option<String>,
}
