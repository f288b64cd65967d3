//! Handlers for LLM story analysis and audio transcription.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use storyweave_core::error::CoreError;
use storyweave_core::types::DbId;
use storyweave_db::models::story_analysis::StoryAnalysisRow;
use storyweave_db::repositories::StoryAnalysisRepo;
use storyweave_providers::ProviderError;

use crate::error::{AppError, AppResult};
use crate::handlers::{load_story_with_access, StoryAccess};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Uploaded audio is capped to keep transcription requests bounded.
const MAX_AUDIO_BYTES: usize = 25 * 1024 * 1024;

/// POST /api/v1/stories/{id}/analyze
///
/// Run the LLM over the story and persist the result.
pub async fn analyze_story(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
) -> AppResult<Json<DataResponse<StoryAnalysisRow>>> {
    let story = load_story_with_access(&state, &auth, story_id, StoryAccess::Read).await?;

    let llm = state
        .llm
        .as_ref()
        .ok_or(AppError::Provider(ProviderError::NotConfigured("OpenAI")))?;

    let analysis = llm.analyze_story(&story.title, &story.body).await?;

    let row = StoryAnalysisRepo::create(
        &state.pool,
        story.id,
        llm.model(),
        &serde_json::json!(analysis.characters),
        &serde_json::json!(analysis.emotions),
        &analysis.summary,
    )
    .await?;

    tracing::info!(
        story_id,
        characters = analysis.characters.len(),
        emotions = analysis.emotions.len(),
        "Story analyzed"
    );

    Ok(Json(DataResponse { data: row }))
}

/// GET /api/v1/stories/{id}/analysis
///
/// Return the most recent analysis for the story.
pub async fn get_analysis(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
) -> AppResult<Json<DataResponse<StoryAnalysisRow>>> {
    load_story_with_access(&state, &auth, story_id, StoryAccess::Read).await?;

    let row = StoryAnalysisRepo::latest_for_story(&state.pool, story_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "StoryAnalysis",
            id: story_id,
        }))?;

    Ok(Json(DataResponse { data: row }))
}

/// POST /api/v1/transcriptions
///
/// Transcribe an uploaded spoken-story recording (multipart `file` part).
/// Returns the text; the client then creates a story with `source: uploaded`.
pub async fn transcribe(
    _auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let llm = state
        .llm
        .as_ref()
        .ok_or(AppError::Provider(ProviderError::NotConfigured("OpenAI")))?;

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("recording.mp3").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
            if bytes.len() > MAX_AUDIO_BYTES {
                return Err(AppError::BadRequest(format!(
                    "audio upload exceeds {MAX_AUDIO_BYTES} bytes"
                )));
            }
            upload = Some((file_name, bytes.to_vec()));
        }
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("missing 'file' part".into()))?;

    let text = llm.transcribe(&file_name, bytes).await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({ "text": text }),
    }))
}
