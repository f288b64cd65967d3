use std::sync::Arc;

use storyweave_providers::llm::OpenAiClient;
use storyweave_providers::video::ProviderRegistry;
use storyweave_providers::voice::ElevenLabsClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: storyweave_db::DbPool,
    /// Server configuration (bind address, CORS, JWT, media root).
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for publishing domain events.
    pub event_bus: Arc<storyweave_events::EventBus>,
    /// Prioritized video generation provider registry.
    pub video_registry: Arc<ProviderRegistry>,
    /// ElevenLabs client; `None` when the vendor is not configured.
    pub voice: Option<Arc<ElevenLabsClient>>,
    /// OpenAI client; `None` when the vendor is not configured.
    pub llm: Option<Arc<OpenAiClient>>,
}
