//! Story entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storyweave_core::types::{DbId, Timestamp};

/// A row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Story {
    pub id: DbId,
    pub owner_id: DbId,
    pub title: String,
    pub body: String,
    /// How the text entered the system: `"written"` or `"uploaded"`.
    pub source: String,
    pub language: String,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a story.
#[derive(Debug, Deserialize)]
pub struct CreateStory {
    pub title: String,
    pub body: String,
    pub source: Option<String>,
    pub language: Option<String>,
}

/// DTO for updating a story. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateStory {
    pub title: Option<String>,
    pub body: Option<String>,
    pub language: Option<String>,
}
