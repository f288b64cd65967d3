//! HTTP handlers, one module per resource.

pub mod analysis;
pub mod auth;
pub mod campaign;
pub mod narration;
pub mod notification;
pub mod provider_admin;
pub mod share;
pub mod story;
pub mod video;
pub mod voice_profile;

use storyweave_core::error::CoreError;
use storyweave_core::sharing::share_roles;
use storyweave_core::types::DbId;
use storyweave_db::models::story::Story;
use storyweave_db::repositories::{ShareRepo, StoryRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Access level required on a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryAccess {
    /// Owner, editor, or viewer.
    Read,
    /// Owner or editor.
    Write,
}

/// Load a story and enforce the caller's access to it.
///
/// Owners hold every right; shared users hold the right their share role
/// grants. Missing stories 404; foreign stories 403.
pub async fn load_story_with_access(
    state: &AppState,
    auth: &AuthUser,
    story_id: DbId,
    access: StoryAccess,
) -> AppResult<Story> {
    let story = StoryRepo::find_by_id(&state.pool, story_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Story",
            id: story_id,
        }))?;

    if story.owner_id == auth.user_id {
        return Ok(story);
    }

    let share = ShareRepo::find(&state.pool, story_id, auth.user_id).await?;
    let allowed = match (access, share.as_ref().map(|s| s.share_role.as_str())) {
        (StoryAccess::Read, Some(_)) => true,
        (StoryAccess::Write, Some(role)) => role == share_roles::EDITOR,
        (_, None) => false,
    };

    if !allowed {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have access to this story".into(),
        )));
    }

    Ok(story)
}
