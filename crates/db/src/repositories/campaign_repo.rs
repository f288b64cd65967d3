//! Repository for the `notification_campaigns` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::notification::{Campaign, CreateCampaign, UpdateCampaign};

const COLUMNS: &str =
    "id, domain, event_type, channels, template_key, enabled, created_at, updated_at";

/// Provides CRUD operations for notification campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a new campaign, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCampaign) -> Result<Campaign, sqlx::Error> {
        let channels = serde_json::json!(input.channels);
        let query = format!(
            "INSERT INTO notification_campaigns (domain, event_type, channels, template_key, enabled)
             VALUES ($1, $2, $3, $4, COALESCE($5, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(&input.domain)
            .bind(&input.event_type)
            .bind(channels)
            .bind(&input.template_key)
            .bind(input.enabled)
            .fetch_one(pool)
            .await
    }

    /// Find a campaign by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the enabled campaign matching a `(domain, event_type)` pair.
    ///
    /// This is the dispatcher's lookup: at most one campaign exists per pair
    /// (unique constraint), and disabled campaigns are invisible here.
    pub async fn find_enabled(
        pool: &PgPool,
        domain: &str,
        event_type: &str,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_campaigns
             WHERE domain = $1 AND event_type = $2 AND enabled = TRUE"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(domain)
            .bind(event_type)
            .fetch_optional(pool)
            .await
    }

    /// List all campaigns ordered by domain then event type.
    pub async fn list(pool: &PgPool) -> Result<Vec<Campaign>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM notification_campaigns ORDER BY domain, event_type");
        sqlx::query_as::<_, Campaign>(&query).fetch_all(pool).await
    }

    /// Update a campaign. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let channels = input.channels.as_ref().map(|c| serde_json::json!(c));
        let query = format!(
            "UPDATE notification_campaigns SET
                channels = COALESCE($2, channels),
                template_key = COALESCE($3, template_key),
                enabled = COALESCE($4, enabled),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(channels)
            .bind(&input.template_key)
            .bind(input.enabled)
            .fetch_optional(pool)
            .await
    }

    /// Delete a campaign by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notification_campaigns WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
