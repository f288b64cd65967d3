//! Notification campaign, template, delivery, and preference models with DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storyweave_core::types::{DbId, Timestamp};

/// A row from the `notification_campaigns` table.
///
/// Maps a `(domain, event_type)` pair to a set of delivery channels and a
/// template key. `channels` is a JSON array of channel name strings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub domain: String,
    pub event_type: String,
    pub channels: serde_json::Value,
    pub template_key: String,
    pub enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Campaign {
    /// Decode the `channels` JSON array into channel name strings.
    ///
    /// Malformed entries are dropped rather than failing the dispatch.
    pub fn channel_names(&self) -> Vec<String> {
        serde_json::from_value(self.channels.clone()).unwrap_or_default()
    }
}

/// DTO for creating a campaign.
#[derive(Debug, Deserialize)]
pub struct CreateCampaign {
    pub domain: String,
    pub event_type: String,
    pub channels: Vec<String>,
    pub template_key: String,
    pub enabled: Option<bool>,
}

/// DTO for updating a campaign. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateCampaign {
    pub channels: Option<Vec<String>>,
    pub template_key: Option<String>,
    pub enabled: Option<bool>,
}

/// A row from the `notification_templates` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Template {
    pub id: DbId,
    pub template_key: String,
    pub channel: String,
    pub locale: String,
    /// Email subject line; unused for SMS and in-app templates.
    pub subject: Option<String>,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a template.
#[derive(Debug, Deserialize)]
pub struct CreateTemplate {
    pub template_key: String,
    pub channel: String,
    pub locale: Option<String>,
    pub subject: Option<String>,
    pub body: String,
}

/// DTO for updating a template. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateTemplate {
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// A row from the `notification_deliveries` table.
///
/// One row per (event, user, channel) send attempt; `status` is
/// `pending`, `sent`, or `failed` with `error` carrying the failure text.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Delivery {
    pub id: DbId,
    pub campaign_id: DbId,
    pub event_id: Option<DbId>,
    pub user_id: DbId,
    pub channel: String,
    /// Resolved destination: email address or phone number.
    pub recipient: Option<String>,
    pub subject: Option<String>,
    pub body: String,
    pub status: String,
    pub error: Option<String>,
    pub created_at: Timestamp,
    pub sent_at: Option<Timestamp>,
}

/// A row from the `notification_preferences` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Preference {
    pub id: DbId,
    pub user_id: DbId,
    pub channel: String,
    pub enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating a per-channel preference.
#[derive(Debug, Deserialize)]
pub struct UpdatePreference {
    pub channel: String,
    pub enabled: bool,
}
