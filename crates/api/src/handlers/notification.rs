//! Handlers for user-facing notification preferences and delivery history.

use axum::extract::{Query, State};
use axum::Json;
use storyweave_core::channels::{is_valid_channel, VALID_CHANNELS};
use storyweave_core::error::CoreError;
use storyweave_db::models::notification::{Delivery, Preference, UpdatePreference};
use storyweave_db::repositories::{DeliveryRepo, PreferenceRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/notifications/deliveries
///
/// The authenticated user's delivery history, newest first. In-app
/// notifications are read from here as well.
pub async fn list_deliveries(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Delivery>>>> {
    let deliveries =
        DeliveryRepo::list_for_user(&state.pool, auth.user_id, params.limit(), params.offset())
            .await?;
    Ok(Json(DataResponse { data: deliveries }))
}

/// GET /api/v1/notifications/preferences
///
/// Explicit preferences plus the channel catalogue so the client can render
/// toggles for channels that have no preference row yet (default enabled).
pub async fn get_preferences(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    let prefs = PreferenceRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "preferences": prefs,
            "channels": VALID_CHANNELS,
        }),
    }))
}

/// PUT /api/v1/notifications/preferences
///
/// Enable or disable one delivery channel for the authenticated user.
pub async fn update_preference(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdatePreference>,
) -> AppResult<Json<DataResponse<Preference>>> {
    if !is_valid_channel(&input.channel) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "channel must be one of: {}",
            VALID_CHANNELS.join(", ")
        ))));
    }

    let pref =
        PreferenceRepo::upsert(&state.pool, auth.user_id, &input.channel, input.enabled).await?;
    Ok(Json(DataResponse { data: pref }))
}
