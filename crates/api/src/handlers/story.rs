//! Handlers for the `/stories` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storyweave_core::error::CoreError;
use storyweave_core::types::DbId;
use storyweave_db::models::story::{CreateStory, Story, UpdateStory};
use storyweave_db::repositories::StoryRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{load_story_with_access, StoryAccess};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Story sources accepted on upload.
const VALID_SOURCES: &[&str] = &["written", "uploaded"];

/// POST /api/v1/stories
///
/// Create a story owned by the authenticated user.
pub async fn create_story(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateStory>,
) -> AppResult<Json<DataResponse<Story>>> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "title must not be empty".into(),
        )));
    }
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "body must not be empty".into(),
        )));
    }
    if let Some(ref source) = input.source {
        if !VALID_SOURCES.contains(&source.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "source must be one of: {}",
                VALID_SOURCES.join(", ")
            ))));
        }
    }

    let story = StoryRepo::create(&state.pool, auth.user_id, &input).await?;
    tracing::info!(story_id = story.id, owner_id = auth.user_id, "Story created");

    Ok(Json(DataResponse { data: story }))
}

/// GET /api/v1/stories
///
/// List stories the user owns or has been shared, newest first.
pub async fn list_stories(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Story>>>> {
    let stories =
        StoryRepo::list_for_user(&state.pool, auth.user_id, params.limit(), params.offset())
            .await?;
    Ok(Json(DataResponse { data: stories }))
}

/// GET /api/v1/stories/{id}
pub async fn get_story(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Story>>> {
    let story = load_story_with_access(&state, &auth, story_id, StoryAccess::Read).await?;
    Ok(Json(DataResponse { data: story }))
}

/// PUT /api/v1/stories/{id}
///
/// Update title/body/language. Requires write access (owner or editor).
pub async fn update_story(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
    Json(input): Json<UpdateStory>,
) -> AppResult<Json<DataResponse<Story>>> {
    load_story_with_access(&state, &auth, story_id, StoryAccess::Write).await?;

    if let Some(ref title) = input.title {
        if title.trim().is_empty() {
            return Err(AppError::Core(CoreError::Validation(
                "title must not be empty".into(),
            )));
        }
    }

    let story = StoryRepo::update(&state.pool, story_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Story",
            id: story_id,
        }))?;

    Ok(Json(DataResponse { data: story }))
}

/// DELETE /api/v1/stories/{id}
///
/// Soft-delete a story. Owner only.
pub async fn delete_story(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = load_story_with_access(&state, &auth, story_id, StoryAccess::Read).await?;
    if story.owner_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the owner can delete a story".into(),
        )));
    }

    StoryRepo::soft_delete(&state.pool, story_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
