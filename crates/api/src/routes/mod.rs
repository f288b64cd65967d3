pub mod admin;
pub mod auth;
pub mod health;
pub mod notification;
pub mod provider;
pub mod story;
pub mod video;
pub mod voice;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout
///
/// /stories                              list, create
/// /stories/{id}                         get, update, delete
/// /stories/{id}/analyze                 run LLM analysis (POST)
/// /stories/{id}/analysis                latest analysis (GET)
/// /stories/{id}/narrate                 synthesize narration (POST)
/// /stories/{id}/narrations              list narrations (GET)
/// /stories/{id}/videos                  list, create render jobs
/// /stories/{id}/shares                  list, create shares
/// /stories/{id}/shares/{user_id}        revoke share (DELETE)
///
/// /transcriptions                       transcribe audio upload (POST)
///
/// /voice-profiles                       list, create (multipart)
/// /voice-profiles/esm-prompts           recording prompt catalogue (GET)
/// /voice-profiles/{id}                  get, delete
///
/// /videos/{id}                          get render job
/// /videos/{id}/refresh                  re-poll vendor status (GET)
///
/// /providers/video                      list registry (GET)
/// /providers/video/active               switch active provider (POST, admin)
///
/// /notifications/deliveries             delivery history (GET)
/// /notifications/preferences            get, update per-channel preference
///
/// /admin/campaigns                      list, create (admin only)
/// /admin/campaigns/{id}                 get, update, delete
/// /admin/templates                      list, create (admin only)
/// /admin/templates/{id}                 update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // Stories and their nested analysis/narration/video/share resources.
        .nest("/stories", story::router())
        // Spoken-story transcription.
        .route("/transcriptions", post(handlers::analysis::transcribe))
        // Voice cloning profiles and ESM prompts.
        .nest("/voice-profiles", voice::router())
        // Render job lookup and vendor status refresh.
        .nest("/videos", video::router())
        // Video provider registry.
        .nest("/providers", provider::router())
        // Notification preferences and delivery history.
        .nest("/notifications", notification::router())
        // Campaign and template administration.
        .nest("/admin", admin::router())
}
