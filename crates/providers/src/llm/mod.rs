//! LLM adapters for story analysis and audio transcription.

pub mod openai;

pub use openai::{OpenAiClient, OpenAiConfig};
