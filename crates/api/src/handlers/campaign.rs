//! Admin handlers for notification campaigns and templates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use storyweave_core::channels::{is_valid_channel, VALID_CHANNELS};
use storyweave_core::error::CoreError;
use storyweave_core::template;
use storyweave_core::types::DbId;
use storyweave_db::models::notification::{
    Campaign, CreateCampaign, CreateTemplate, Template, UpdateCampaign, UpdateTemplate,
};
use storyweave_db::repositories::{CampaignRepo, TemplateRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Campaigns
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/campaigns
pub async fn list_campaigns(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Campaign>>>> {
    auth.require_admin()?;
    let campaigns = CampaignRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: campaigns }))
}

/// POST /api/v1/admin/campaigns
///
/// Create a campaign mapping a `(domain, event_type)` pair to channels and
/// a template key.
pub async fn create_campaign(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCampaign>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    auth.require_admin()?;
    validate_channels(&input.channels)?;
    if input.domain.trim().is_empty() || input.event_type.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "domain and event_type must not be empty".into(),
        )));
    }

    let campaign = CampaignRepo::create(&state.pool, &input).await?;
    tracing::info!(
        campaign_id = campaign.id,
        domain = %campaign.domain,
        event_type = %campaign.event_type,
        "Campaign created"
    );
    Ok(Json(DataResponse { data: campaign }))
}

/// GET /api/v1/admin/campaigns/{id}
pub async fn get_campaign(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    auth.require_admin()?;
    let campaign = CampaignRepo::find_by_id(&state.pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;
    Ok(Json(DataResponse { data: campaign }))
}

/// PUT /api/v1/admin/campaigns/{id}
pub async fn update_campaign(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
    Json(input): Json<UpdateCampaign>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    auth.require_admin()?;
    if let Some(ref channels) = input.channels {
        validate_channels(channels)?;
    }

    let campaign = CampaignRepo::update(&state.pool, campaign_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;
    Ok(Json(DataResponse { data: campaign }))
}

/// DELETE /api/v1/admin/campaigns/{id}
pub async fn delete_campaign(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(campaign_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let removed = CampaignRepo::delete(&state.pool, campaign_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/templates
pub async fn list_templates(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Template>>>> {
    auth.require_admin()?;
    let templates = TemplateRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// POST /api/v1/admin/templates
///
/// Create a template. The response echoes the `{{var}}` placeholder names
/// the body expects, so admins can cross-check against event payloads.
pub async fn create_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTemplate>,
) -> AppResult<Json<DataResponse<serde_json::Value>>> {
    auth.require_admin()?;
    if !is_valid_channel(&input.channel) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "channel must be one of: {}",
            VALID_CHANNELS.join(", ")
        ))));
    }
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "body must not be empty".into(),
        )));
    }

    let placeholders = template::placeholders(&input.body);
    let created = TemplateRepo::create(&state.pool, &input).await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "template": created,
            "placeholders": placeholders,
        }),
    }))
}

/// PUT /api/v1/admin/templates/{id}
pub async fn update_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
    Json(input): Json<UpdateTemplate>,
) -> AppResult<Json<DataResponse<Template>>> {
    auth.require_admin()?;
    let updated = TemplateRepo::update(&state.pool, template_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id: template_id,
        }))?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/templates/{id}
pub async fn delete_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    auth.require_admin()?;
    let removed = TemplateRepo::delete(&state.pool, template_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id: template_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Reject campaign channel lists containing unknown channels.
fn validate_channels(channels: &[String]) -> Result<(), AppError> {
    if channels.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "channels must not be empty".into(),
        )));
    }
    for channel in channels {
        if !is_valid_channel(channel) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "unknown channel '{channel}', valid: {}",
                VALID_CHANNELS.join(", ")
            ))));
        }
    }
    Ok(())
}
