//! Story analysis entity model.

use serde::Serialize;
use sqlx::FromRow;
use storyweave_core::types::{DbId, Timestamp};

/// A row from the `story_analyses` table.
///
/// `characters` and `emotions` hold the JSON encodings of
/// `storyweave_core::analysis::{CharacterProfile, EmotionalBeat}` lists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StoryAnalysisRow {
    pub id: DbId,
    pub story_id: DbId,
    /// Model identifier the analysis was produced with.
    pub model: String,
    pub characters: serde_json::Value,
    pub emotions: serde_json::Value,
    pub summary: String,
    pub created_at: Timestamp,
}
