//! Story analysis domain types.
//!
//! The shapes returned by the LLM adapter, stored in `story_analyses.characters`
//! / `.emotions` JSONB columns, and echoed by the analysis endpoints. Kept in
//! `core` so the provider and db crates agree on the wire format.

use serde::{Deserialize, Serialize};

/// A character the LLM identified in a story.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterProfile {
    /// Character name as it appears in the text.
    pub name: String,
    /// Narrative role, e.g. `"protagonist"`, `"narrator"`, `"antagonist"`.
    pub role: String,
    /// Short free-form trait descriptions.
    #[serde(default)]
    pub traits: Vec<String>,
}

/// An emotional beat within the story arc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionalBeat {
    /// Dominant emotion label, e.g. `"wonder"`, `"grief"`.
    pub emotion: String,
    /// Intensity from 0.0 (barely present) to 1.0 (overwhelming).
    pub intensity: f64,
    /// The passage or moment the emotion attaches to.
    pub context: String,
}

/// Complete analysis result for one story.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoryAnalysis {
    pub characters: Vec<CharacterProfile>,
    pub emotions: Vec<EmotionalBeat>,
    /// One-paragraph synopsis used as the default video prompt.
    pub summary: String,
}

/// Clamp an LLM-reported intensity into the valid `[0.0, 1.0]` range.
///
/// Models occasionally return values slightly outside the requested range;
/// out-of-range input is clamped rather than rejected.
pub fn clamp_intensity(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Validate an analysis result before persisting it.
///
/// An empty summary or a character without a name indicates the model
/// response did not follow the requested schema.
pub fn validate_analysis(analysis: &StoryAnalysis) -> Result<(), String> {
    if analysis.summary.trim().is_empty() {
        return Err("analysis summary must not be empty".to_string());
    }
    for character in &analysis.characters {
        if character.name.trim().is_empty() {
            return Err("character name must not be empty".to_string());
        }
    }
    for beat in &analysis.emotions {
        if !(0.0..=1.0).contains(&beat.intensity) {
            return Err(format!(
                "emotion intensity must be within [0.0, 1.0], got {}",
                beat.intensity
            ));
        }
    }
    Ok(())
}
