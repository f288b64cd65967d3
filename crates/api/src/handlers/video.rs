//! Handlers for video render jobs.

use axum::extract::{Path, State};
use axum::Json;
use storyweave_core::error::CoreError;
use storyweave_core::status::video_job;
use storyweave_core::types::DbId;
use storyweave_db::models::video_job::{CreateVideoJob, VideoJob};
use storyweave_db::repositories::{StoryAnalysisRepo, VideoJobRepo};
use storyweave_events::DomainEvent;
use storyweave_providers::video::{VideoRequest, VideoStatus};

use crate::error::{AppError, AppResult};
use crate::handlers::{load_story_with_access, StoryAccess};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/stories/{id}/videos
///
/// Create a render job and submit it through the provider registry with
/// fallback. The row is written `pending`, then updated to `submitted` with
/// the accepting vendor, or `failed` when every vendor rejects it.
pub async fn create_video(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
    Json(input): Json<CreateVideoJob>,
) -> AppResult<Json<DataResponse<VideoJob>>> {
    let story = load_story_with_access(&state, &auth, story_id, StoryAccess::Write).await?;

    // Default prompt: the latest analysis summary, then the story title.
    let prompt = match input.prompt {
        Some(p) if !p.trim().is_empty() => p,
        _ => StoryAnalysisRepo::latest_for_story(&state.pool, story.id)
            .await?
            .map(|a| a.summary)
            .unwrap_or_else(|| story.title.clone()),
    };

    let job = VideoJobRepo::create(&state.pool, story.id, &prompt).await?;

    match state
        .video_registry
        .submit_with_fallback(&VideoRequest::new(prompt))
        .await
    {
        Ok((provider, provider_job_id)) => {
            let job = VideoJobRepo::mark_submitted(&state.pool, job.id, provider, &provider_job_id)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "VideoJob",
                    id: job.id,
                }))?;

            state.event_bus.publish(
                DomainEvent::new("video", "render_submitted")
                    .with_source("video_job", job.id)
                    .with_actor(auth.user_id)
                    .with_payload(serde_json::json!({
                        "story_title": story.title,
                        "provider": provider,
                    })),
            );

            Ok(Json(DataResponse { data: job }))
        }
        Err(e) => {
            let reason = e.to_string();
            VideoJobRepo::mark_failed(&state.pool, job.id, &reason).await?;

            state.event_bus.publish(
                DomainEvent::new("video", "render_failed")
                    .with_source("video_job", job.id)
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

/// GET /api/v1/stories/{id}/videos
///
/// List render jobs for a story, newest first.
pub async fn list_videos(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<VideoJob>>>> {
    load_story_with_access(&state, &auth, story_id, StoryAccess::Read).await?;
    let jobs = VideoJobRepo::list_for_story(&state.pool, story_id).await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/videos/{id}
pub async fn get_video(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<Json<DataResponse<VideoJob>>> {
    let job = accessible_job(&state, &auth, job_id).await?;
    Ok(Json(DataResponse { data: job }))
}

/// GET /api/v1/videos/{id}/refresh
///
/// Re-poll the vendor for a submitted job and write the status back.
pub async fn refresh_video(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<Json<DataResponse<VideoJob>>> {
    let job = accessible_job(&state, &auth, job_id).await?;

    // Terminal rows and never-submitted rows have nothing to poll.
    if job.status != video_job::SUBMITTED {
        return Ok(Json(DataResponse { data: job }));
    }

    let (provider, provider_job_id) = match (&job.provider, &job.provider_job_id) {
        (Some(p), Some(id)) => (p.clone(), id.clone()),
        _ => {
            return Err(AppError::InternalError(
                "submitted job is missing its provider reference".into(),
            ))
        }
    };

    let status = state
        .video_registry
        .status(&provider, &provider_job_id)
        .await?;

    let job = match status {
        VideoStatus::Completed { output_url } => {
            let job = VideoJobRepo::mark_completed(&state.pool, job.id, &output_url)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "VideoJob",
                    id: job_id,
                }))?;

            state.event_bus.publish(
                DomainEvent::new("video", "render_completed")
                    .with_source("video_job", job.id)
                    .with_actor(auth.user_id)
                    .with_payload(serde_json::json!({
                        "provider": provider,
                        "output_url": job.output_url,
                    })),
            );
            job
        }
        VideoStatus::Failed { reason } => {
            let job = VideoJobRepo::mark_failed(&state.pool, job.id, &reason)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "VideoJob",
                    id: job_id,
                }))?;

            state.event_bus.publish(
                DomainEvent::new("video", "render_failed")
                    .with_source("video_job", job.id)
                    .with_actor(auth.user_id)
                    .with_payload(serde_json::json!({
                        "provider": provider,
                        "reason": reason,
                    })),
            );
            job
        }
        // Still queued or rendering; the row already says `submitted`.
        VideoStatus::Queued | VideoStatus::Rendering => job,
    };

    Ok(Json(DataResponse { data: job }))
}

/// Load a job and enforce read access through its story.
async fn accessible_job(state: &AppState, auth: &AuthUser, job_id: DbId) -> AppResult<VideoJob> {
    let job = VideoJobRepo::find_by_id(&state.pool, job_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "VideoJob",
            id: job_id,
        }))?;

    load_story_with_access(state, auth, job.story_id, StoryAccess::Read).await?;
    Ok(job)
}
