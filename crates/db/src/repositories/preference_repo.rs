//! Repository for the `notification_preferences` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::notification::Preference;

const COLUMNS: &str = "id, user_id, channel, enabled, created_at, updated_at";

/// Provides per-channel notification preference lookups and upserts.
pub struct PreferenceRepo;

impl PreferenceRepo {
    /// Fetch a user's preference for one channel.
    ///
    /// `None` means the user never set one; the dispatcher treats that as
    /// enabled.
    pub async fn get(
        pool: &PgPool,
        user_id: DbId,
        channel: &str,
    ) -> Result<Option<Preference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_preferences
             WHERE user_id = $1 AND channel = $2"
        );
        sqlx::query_as::<_, Preference>(&query)
            .bind(user_id)
            .bind(channel)
            .fetch_optional(pool)
            .await
    }

    /// List all of a user's explicit preferences.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Preference>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_preferences
             WHERE user_id = $1
             ORDER BY channel"
        );
        sqlx::query_as::<_, Preference>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Create or update a user's preference for a channel, returning the row.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        channel: &str,
        enabled: bool,
    ) -> Result<Preference, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_preferences (user_id, channel, enabled)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_notification_preferences_user_channel
             DO UPDATE SET enabled = EXCLUDED.enabled, updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Preference>(&query)
            .bind(user_id)
            .bind(channel)
            .bind(enabled)
            .fetch_one(pool)
            .await
    }
}
