//! Voice cloning and text-to-speech adapters.

pub mod elevenlabs;

pub use elevenlabs::{ElevenLabsClient, ElevenLabsConfig, VoiceSample};
