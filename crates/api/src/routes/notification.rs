//! Route definitions for `/notifications`.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET /deliveries   -> list_deliveries (?limit, offset)
/// GET /preferences  -> get_preferences
/// PUT /preferences  -> update_preference
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/deliveries", get(notification::list_deliveries))
        .route(
            "/preferences",
            get(notification::get_preferences).put(notification::update_preference),
        )
}
