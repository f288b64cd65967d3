//! Route definitions for the `/stories` resource and its sub-resources.
//!
//! All endpoints require authentication.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{analysis, narration, share, story, video};
use crate::state::AppState;

/// Routes mounted at `/stories`.
///
/// ```text
/// GET    /                       -> list_stories
/// POST   /                       -> create_story
/// GET    /{id}                   -> get_story
/// PUT    /{id}                   -> update_story
/// DELETE /{id}                   -> delete_story
///
/// POST   /{id}/analyze           -> analyze_story
/// GET    /{id}/analysis          -> get_analysis
///
/// POST   /{id}/narrate           -> narrate_story
/// GET    /{id}/narrations        -> list_narrations
///
/// GET    /{id}/videos            -> list_videos
/// POST   /{id}/videos            -> create_video
///
/// GET    /{id}/shares            -> list_shares
/// POST   /{id}/shares            -> create_share
/// DELETE /{id}/shares/{user_id}  -> delete_share
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(story::list_stories).post(story::create_story))
        .route(
            "/{id}",
            get(story::get_story)
                .put(story::update_story)
                .delete(story::delete_story),
        )
        // LLM analysis
        .route("/{id}/analyze", post(analysis::analyze_story))
        .route("/{id}/analysis", get(analysis::get_analysis))
        // Narration
        .route("/{id}/narrate", post(narration::narrate_story))
        .route("/{id}/narrations", get(narration::list_narrations))
        // Video render jobs
        .route(
            "/{id}/videos",
            get(video::list_videos).post(video::create_video),
        )
        // Collaboration
        .route(
            "/{id}/shares",
            get(share::list_shares).post(share::create_share),
        )
        .route("/{id}/shares/{user_id}", delete(share::delete_share))
}
