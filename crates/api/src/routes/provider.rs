//! Route definitions for `/providers`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::provider_admin;
use crate::state::AppState;

/// Routes mounted at `/providers`.
///
/// ```text
/// GET  /video         -> list_video_providers
/// POST /video/active  -> set_active_video_provider (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/video", get(provider_admin::list_video_providers))
        .route(
            "/video/active",
            post(provider_admin::set_active_video_provider),
        )
}
