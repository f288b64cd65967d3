//! Emotion/Sound/Modulation (ESM) reference data.
//!
//! The catalogue of recording prompts shown to users while capturing voice
//! samples for cloning. Each prompt pairs a target emotion with a sample
//! sentence and a modulation hint; covering a spread of emotions gives the
//! vendor enough tonal range to build a usable clone.

use serde::Serialize;

/// One voice-sample recording prompt.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct EsmPrompt {
    /// Target emotion, e.g. `"joy"`.
    pub emotion: &'static str,
    /// The sentence the user is asked to read aloud.
    pub sample_text: &'static str,
    /// How the sentence should be delivered.
    pub modulation: &'static str,
}

/// The full recording-prompt catalogue, in recommended recording order.
pub const ESM_PROMPTS: &[EsmPrompt] = &[
    EsmPrompt {
        emotion: "neutral",
        sample_text: "The ferry leaves the harbor at seven and returns before dark.",
        modulation: "even pace, relaxed, conversational",
    },
    EsmPrompt {
        emotion: "joy",
        sample_text: "She opened the letter and laughed out loud before she finished the first line.",
        modulation: "bright, rising pitch, quicker pace",
    },
    EsmPrompt {
        emotion: "sadness",
        sample_text: "The house stood empty now, and the garden had gone to seed.",
        modulation: "slow, low, softened consonants",
    },
    EsmPrompt {
        emotion: "fear",
        sample_text: "Something moved behind the door, and it was not the wind.",
        modulation: "hushed, tense, clipped phrases",
    },
    EsmPrompt {
        emotion: "anger",
        sample_text: "You knew the bridge was out and you sent them anyway.",
        modulation: "hard stress on key words, controlled volume",
    },
    EsmPrompt {
        emotion: "wonder",
        sample_text: "Above the treeline, the sky rippled with colors none of them could name.",
        modulation: "breathy, slow build, wide pitch range",
    },
    EsmPrompt {
        emotion: "whisper",
        sample_text: "Stay close to me and do not make a sound until we pass the gate.",
        modulation: "true whisper, steady rhythm",
    },
    EsmPrompt {
        emotion: "excitement",
        sample_text: "They found it, after all these years they actually found it!",
        modulation: "fast, energetic, exclamatory",
    },
];

/// Minimum number of distinct-emotion samples a clone request should carry.
///
/// Fewer than this and vendors tend to produce flat, single-register clones.
pub const MIN_SAMPLES_FOR_CLONE: usize = 3;

/// Look up a prompt by emotion label.
pub fn prompt_for_emotion(emotion: &str) -> Option<&'static EsmPrompt> {
    ESM_PROMPTS.iter().find(|p| p.emotion == emotion)
}

/// Returns `true` if the emotion label exists in the catalogue.
pub fn is_known_emotion(emotion: &str) -> bool {
    prompt_for_emotion(emotion).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_covers_minimum_clone_samples() {
        assert!(ESM_PROMPTS.len() >= MIN_SAMPLES_FOR_CLONE);
    }

    #[test]
    fn emotions_are_unique() {
        let mut labels: Vec<_> = ESM_PROMPTS.iter().map(|p| p.emotion).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), ESM_PROMPTS.len());
    }

    #[test]
    fn lookup_finds_known_emotion() {
        let p = prompt_for_emotion("whisper").expect("whisper prompt exists");
        assert_eq!(p.modulation, "true whisper, steady rhythm");
    }

    #[test]
    fn lookup_rejects_unknown_emotion() {
        assert!(prompt_for_emotion("melancholy").is_none());
        assert!(!is_known_emotion("JOY"));
    }

    #[test]
    fn every_prompt_has_text_and_modulation() {
        for p in ESM_PROMPTS {
            assert!(!p.sample_text.is_empty());
            assert!(!p.modulation.is_empty());
        }
    }
}
