//! Handlers for collaborative story sharing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storyweave_core::error::CoreError;
use storyweave_core::sharing::{share_roles, validate_share};
use storyweave_core::types::DbId;
use storyweave_db::models::share::{CreateShare, StoryShare};
use storyweave_db::repositories::{ShareRepo, UserRepo};
use storyweave_events::DomainEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::{load_story_with_access, StoryAccess};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stories/{id}/shares
///
/// List who a story is shared with. Requires read access.
pub async fn list_shares(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<StoryShare>>>> {
    load_story_with_access(&state, &auth, story_id, StoryAccess::Read).await?;
    let shares = ShareRepo::list_for_story(&state.pool, story_id).await?;
    Ok(Json(DataResponse { data: shares }))
}

/// POST /api/v1/stories/{id}/shares
///
/// Share a story with another user. Owner only; re-sharing updates the role.
pub async fn create_share(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
    Json(input): Json<CreateShare>,
) -> AppResult<Json<DataResponse<StoryShare>>> {
    let story = load_story_with_access(&state, &auth, story_id, StoryAccess::Read).await?;
    if story.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner can share a story".into(),
        )));
    }

    let role = input
        .share_role
        .unwrap_or_else(|| share_roles::VIEWER.to_string());
    validate_share(story.owner_id, input.user_id, &role)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // The target must be a real, active account.
    let target = UserRepo::find_by_id(&state.pool, input.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: input.user_id,
        }))?;

    let share = ShareRepo::upsert(&state.pool, story_id, target.id, &role).await?;

    state.event_bus.publish(
        DomainEvent::new("story", "shared")
            .with_source("story", story.id)
            .with_actor(auth.user_id)
            .with_payload(serde_json::json!({
                "story_title": story.title,
                "share_role": share.share_role,
                "recipient_user_ids": [target.id],
            })),
    );

    Ok(Json(DataResponse { data: share }))
}

/// DELETE /api/v1/stories/{id}/shares/{user_id}
///
/// Revoke a share. Owner only.
pub async fn delete_share(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((story_id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let story = load_story_with_access(&state, &auth, story_id, StoryAccess::Read).await?;
    if story.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner can revoke a share".into(),
        )));
    }

    let removed = ShareRepo::delete(&state.pool, story_id, user_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "StoryShare",
            id: user_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
