//! Route definitions for `/voice-profiles`.

use axum::routing::get;
use axum::Router;

use crate::handlers::voice_profile;
use crate::state::AppState;

/// Routes mounted at `/voice-profiles`.
///
/// ```text
/// GET    /             -> list_profiles
/// POST   /             -> create_profile (multipart)
/// GET    /esm-prompts  -> esm_prompts
/// GET    /{id}         -> get_profile
/// DELETE /{id}         -> delete_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(voice_profile::list_profiles).post(voice_profile::create_profile),
        )
        .route("/esm-prompts", get(voice_profile::esm_prompts))
        .route(
            "/{id}",
            get(voice_profile::get_profile).delete(voice_profile::delete_profile),
        )
}
