//! Storyweave outbound provider adapters.
//!
//! Thin clients around the third-party SaaS APIs the platform depends on:
//!
//! - [`voice`] — ElevenLabs voice cloning and text-to-speech.
//! - [`llm`] — OpenAI story analysis and audio transcription.
//! - [`video`] — the four video generation vendors (Kling, RunwayML, Pika,
//!   Luma) behind a common [`video::VideoProvider`] trait, plus the
//!   prioritized [`video::ProviderRegistry`] with sequential fallback.
//!
//! Each adapter maps vendor-specific JSON onto the internal shapes and
//! returns a typed [`ProviderError`]; callers write `failed` status strings
//! into the owning database row.

pub mod error;
pub mod llm;
pub mod video;
pub mod voice;

pub use error::ProviderError;
