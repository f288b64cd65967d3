//! Handlers for the video provider registry (listing and switching).

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use storyweave_providers::video::ProviderInfo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /providers/video/active`.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    pub name: String,
}

/// GET /api/v1/providers/video
///
/// List registered video providers with priority and the active flag.
pub async fn list_video_providers(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ProviderInfo>>>> {
    let providers = state.video_registry.list().await;
    Ok(Json(DataResponse { data: providers }))
}

/// POST /api/v1/providers/video/active
///
/// Switch the active provider pointer. Admin only.
pub async fn set_active_video_provider(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SetActiveRequest>,
) -> AppResult<Json<DataResponse<Vec<ProviderInfo>>>> {
    auth.require_admin()?;

    state
        .video_registry
        .set_active(&input.name)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let providers = state.video_registry.list().await;
    Ok(Json(DataResponse { data: providers }))
}
