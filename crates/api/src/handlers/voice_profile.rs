//! Handlers for voice cloning profiles and the ESM recording prompts.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storyweave_core::error::CoreError;
use storyweave_core::esm::{ESM_PROMPTS, MIN_SAMPLES_FOR_CLONE};
use storyweave_core::status::voice_profile;
use storyweave_core::types::DbId;
use storyweave_db::models::voice_profile::VoiceProfile;
use storyweave_db::repositories::VoiceProfileRepo;
use storyweave_events::DomainEvent;
use storyweave_providers::voice::VoiceSample;
use storyweave_providers::ProviderError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Per-sample upload cap.
const MAX_SAMPLE_BYTES: usize = 10 * 1024 * 1024;

/// GET /api/v1/voice-profiles/esm-prompts
///
/// The static Emotion/Sound/Modulation catalogue shown during sample
/// recording.
pub async fn esm_prompts() -> Json<DataResponse<serde_json::Value>> {
    Json(DataResponse {
        data: serde_json::json!({
            "prompts": ESM_PROMPTS,
            "min_samples": MIN_SAMPLES_FOR_CLONE,
        }),
    })
}

/// GET /api/v1/voice-profiles
///
/// List the authenticated user's voice profiles.
pub async fn list_profiles(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<VoiceProfile>>>> {
    let profiles = VoiceProfileRepo::list_for_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: profiles }))
}

/// GET /api/v1/voice-profiles/{id}
pub async fn get_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<Json<DataResponse<VoiceProfile>>> {
    let profile = owned_profile(&state, &auth, profile_id).await?;
    Ok(Json(DataResponse { data: profile }))
}

/// POST /api/v1/voice-profiles
///
/// Create a voice clone from uploaded samples (multipart: `name` text part
/// plus one or more `samples` file parts). The profile row is written
/// `pending`, moved to `training` around the vendor call, and lands on
/// `completed` or `failed`.
pub async fn create_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<VoiceProfile>>> {
    let mut name: Option<String> = None;
    let mut samples: Vec<VoiceSample> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        // `text()`/`bytes()` consume the field, so take the part name first.
        let part_name = field.name().map(str::to_string);
        match part_name.as_deref() {
            Some("name") => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("invalid name part: {e}")))?,
                );
            }
            Some("samples") => {
                let file_name = field.file_name().unwrap_or("sample.mp3").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read sample: {e}")))?;
                if bytes.len() > MAX_SAMPLE_BYTES {
                    return Err(AppError::BadRequest(format!(
                        "sample '{file_name}' exceeds {MAX_SAMPLE_BYTES} bytes"
                    )));
                }
                samples.push(VoiceSample {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    let name = name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("missing 'name' part".into()))?;
    if samples.len() < MIN_SAMPLES_FOR_CLONE {
        return Err(AppError::Core(CoreError::Validation(format!(
            "at least {MIN_SAMPLES_FOR_CLONE} voice samples are required"
        ))));
    }

    let profile = VoiceProfileRepo::create(&state.pool, auth.user_id, &name).await?;

    let voice = match state.voice.as_ref() {
        Some(v) => v,
        None => {
            VoiceProfileRepo::set_status(
                &state.pool,
                profile.id,
                voice_profile::FAILED,
                None,
                Some("voice provider not configured"),
            )
            .await?;
            return Err(AppError::Provider(ProviderError::NotConfigured(
                "ElevenLabs",
            )));
        }
    };

    VoiceProfileRepo::set_status(&state.pool, profile.id, voice_profile::TRAINING, None, None)
        .await?;

    match voice.add_voice(&name, samples).await {
        Ok(voice_id) => {
            let profile = VoiceProfileRepo::set_status(
                &state.pool,
                profile.id,
                voice_profile::COMPLETED,
                Some(&voice_id),
                None,
            )
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "VoiceProfile",
                id: profile.id,
            }))?;

            state.event_bus.publish(
                DomainEvent::new("voice", "clone_completed")
                    .with_source("voice_profile", profile.id)
                    .with_actor(auth.user_id)
                    .with_payload(serde_json::json!({ "profile_name": profile.name })),
            );

            Ok(Json(DataResponse { data: profile }))
        }
        Err(e) => {
            let reason = e.to_string();
            VoiceProfileRepo::set_status(
                &state.pool,
                profile.id,
                voice_profile::FAILED,
                None,
                Some(&reason),
            )
            .await?;

            state.event_bus.publish(
                DomainEvent::new("voice", "clone_failed")
                    .with_source("voice_profile", profile.id)
                    .with_actor(auth.user_id)
                    .with_payload(serde_json::json!({
                        "profile_name": name,
                        "reason": reason,
                    })),
            );

            Err(AppError::Provider(e))
        }
    }
}

/// DELETE /api/v1/voice-profiles/{id}
///
/// Remove a profile, deleting the vendor-side voice when one exists.
pub async fn delete_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(profile_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let profile = owned_profile(&state, &auth, profile_id).await?;

    if let (Some(voice), Some(voice_id)) = (state.voice.as_ref(), &profile.provider_voice_id) {
        // Vendor-side cleanup is best effort; the local row is removed
        // regardless.
        if let Err(e) = voice.delete_voice(voice_id).await {
            tracing::warn!(profile_id, error = %e, "Vendor voice deletion failed");
        }
    }

    VoiceProfileRepo::delete(&state.pool, profile_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Load a profile and verify the caller owns it.
async fn owned_profile(
    state: &AppState,
    auth: &AuthUser,
    profile_id: DbId,
) -> AppResult<VoiceProfile> {
    let profile = VoiceProfileRepo::find_by_id(&state.pool, profile_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VoiceProfile",
            id: profile_id,
        }))?;

    if profile.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this voice profile".into(),
        )));
    }

    Ok(profile)
}
