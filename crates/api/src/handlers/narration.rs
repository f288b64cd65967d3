//! Handlers for story narration (text-to-speech).

use axum::extract::{Path, State};
use axum::Json;
use storyweave_core::error::CoreError;
use storyweave_core::status::voice_profile;
use storyweave_core::types::DbId;
use storyweave_db::models::narration::{CreateNarration, Narration};
use storyweave_db::repositories::{NarrationRepo, VoiceProfileRepo};
use storyweave_events::DomainEvent;
use storyweave_providers::ProviderError;

use crate::error::{AppError, AppResult};
use crate::handlers::{load_story_with_access, StoryAccess};
use crate::media;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/stories/{id}/narrate
///
/// Synthesize narration audio for a story with either a completed cloned
/// profile (`voice_profile_id`) or a stock vendor voice (`voice_id`). The
/// narration row is written `pending` and lands on `completed` or `failed`.
pub async fn narrate_story(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
    Json(input): Json<CreateNarration>,
) -> AppResult<Json<DataResponse<Narration>>> {
    let story = load_story_with_access(&state, &auth, story_id, StoryAccess::Write).await?;

    let (profile_id, provider_voice_id) = resolve_voice(&state, &auth, &input).await?;

    let narration =
        NarrationRepo::create(&state.pool, story.id, profile_id, &provider_voice_id).await?;

    let voice = match state.voice.as_ref() {
        Some(v) => v,
        None => {
            NarrationRepo::mark_failed(&state.pool, narration.id, "voice provider not configured")
                .await?;
            return Err(AppError::Provider(ProviderError::NotConfigured(
                "ElevenLabs",
            )));
        }
    };

    match voice.synthesize(&provider_voice_id, &story.body).await {
        Ok(bytes) => {
            let audio_path =
                media::store_narration_audio(&state.config.media_root, narration.id, &bytes)
                    .await
                    .map_err(|e| AppError::InternalError(format!("audio write failed: {e}")))?;

            let narration = NarrationRepo::mark_completed(&state.pool, narration.id, &audio_path, None)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Narration",
                    id: narration.id,
                }))?;

            state.event_bus.publish(
                DomainEvent::new("story", "narration_completed")
                    .with_source("narration", narration.id)
                    .with_actor(auth.user_id)
                    .with_payload(serde_json::json!({ "story_title": story.title })),
            );

            Ok(Json(DataResponse { data: narration }))
        }
        Err(e) => {
            let reason = e.to_string();
            NarrationRepo::mark_failed(&state.pool, narration.id, &reason).await?;

            state.event_bus.publish(
                DomainEvent::new("story", "narration_failed")
                    .with_source("narration", narration.id)
                    .with_actor(auth.user_id)
                    .with_payload(serde_json::json!({
                        "story_title": story.title,
                        "reason": reason,
                    })),
            );

            Err(AppError::Provider(e))
        }
    }
}

/// GET /api/v1/stories/{id}/narrations
///
/// List narrations for a story, newest first.
pub async fn list_narrations(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Narration>>>> {
    load_story_with_access(&state, &auth, story_id, StoryAccess::Read).await?;
    let narrations = NarrationRepo::list_for_story(&state.pool, story_id).await?;
    Ok(Json(DataResponse { data: narrations }))
}

/// Resolve the vendor voice id from the request.
///
/// Exactly one of `voice_profile_id` or `voice_id` must be given. A cloned
/// profile must belong to the caller and be `completed`.
async fn resolve_voice(
    state: &AppState,
    auth: &AuthUser,
    input: &CreateNarration,
) -> AppResult<(Option<DbId>, String)> {
    match (&input.voice_profile_id, &input.voice_id) {
        (Some(profile_id), None) => {
            let profile = VoiceProfileRepo::find_by_id(&state.pool, *profile_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "VoiceProfile",
                    id: *profile_id,
                }))?;

            if profile.owner_id != auth.user_id {
                return Err(AppError::Core(CoreError::Forbidden(
                    "You do not own this voice profile".into(),
                )));
            }
            if profile.status != voice_profile::COMPLETED {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "voice profile is '{}', not completed",
                    profile.status
                ))));
            }

            let voice_id = profile.provider_voice_id.ok_or_else(|| {
                AppError::InternalError("completed profile is missing its vendor voice id".into())
            })?;
            Ok((Some(profile.id), voice_id))
        }
        (None, Some(voice_id)) if !voice_id.trim().is_empty() => {
            Ok((None, voice_id.clone()))
        }
        _ => Err(AppError::Core(CoreError::Validation(
            "exactly one of voice_profile_id or voice_id must be provided".into(),
        ))),
    }
}
