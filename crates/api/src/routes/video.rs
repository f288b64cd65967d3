//! Route definitions for `/videos`.

use axum::routing::get;
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

/// Routes mounted at `/videos`.
///
/// ```text
/// GET /{id}          -> get_video
/// GET /{id}/refresh  -> refresh_video (re-polls the vendor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(video::get_video))
        .route("/{id}/refresh", get(video::refresh_video))
}
