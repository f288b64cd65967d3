//! Route definitions for `/admin` (campaign and template management).
//!
//! All endpoints require the admin role.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::campaign;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /campaigns       -> list_campaigns
/// POST   /campaigns       -> create_campaign
/// GET    /campaigns/{id}  -> get_campaign
/// PUT    /campaigns/{id}  -> update_campaign
/// DELETE /campaigns/{id}  -> delete_campaign
///
/// GET    /templates       -> list_templates
/// POST   /templates       -> create_template
/// PUT    /templates/{id}  -> update_template
/// DELETE /templates/{id}  -> delete_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/campaigns",
            get(campaign::list_campaigns).post(campaign::create_campaign),
        )
        .route(
            "/campaigns/{id}",
            get(campaign::get_campaign)
                .put(campaign::update_campaign)
                .delete(campaign::delete_campaign),
        )
        .route(
            "/templates",
            get(campaign::list_templates).post(campaign::create_template),
        )
        .route(
            "/templates/{id}",
            put(campaign::update_template).delete(campaign::delete_template),
        )
}
