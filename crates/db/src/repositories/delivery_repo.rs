//! Repository for the `notification_deliveries` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::notification::Delivery;

const COLUMNS: &str = "id, campaign_id, event_id, user_id, channel, recipient, subject, body, \
                       status, error, created_at, sent_at";

/// Provides delivery-record bookkeeping for the dispatcher and API.
pub struct DeliveryRepo;

impl DeliveryRepo {
    /// Insert a `pending` delivery row, returning the generated ID.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_pending(
        pool: &PgPool,
        campaign_id: DbId,
        event_id: Option<DbId>,
        user_id: DbId,
        channel: &str,
        recipient: Option<&str>,
        subject: Option<&str>,
        body: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notification_deliveries \
             (campaign_id, event_id, user_id, channel, recipient, subject, body)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(campaign_id)
        .bind(event_id)
        .bind(user_id)
        .bind(channel)
        .bind(recipient)
        .bind(subject)
        .bind(body)
        .fetch_one(pool)
        .await
    }

    /// Insert a delivery row already in `failed` status.
    ///
    /// Used when dispatch cannot even attempt a send (missing template,
    /// missing recipient address) so the delivery ledger stays complete.
    pub async fn create_failed(
        pool: &PgPool,
        campaign_id: DbId,
        event_id: Option<DbId>,
        user_id: DbId,
        channel: &str,
        error: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO notification_deliveries \
             (campaign_id, event_id, user_id, channel, status, error)
             VALUES ($1, $2, $3, $4, 'failed', $5)
             RETURNING id",
        )
        .bind(campaign_id)
        .bind(event_id)
        .bind(user_id)
        .bind(channel)
        .bind(error)
        .fetch_one(pool)
        .await
    }

    /// Mark a delivery as sent.
    pub async fn mark_sent(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE notification_deliveries SET status = 'sent', sent_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Mark a delivery as failed with the error text.
    pub async fn mark_failed(pool: &PgPool, id: DbId, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE notification_deliveries SET status = 'failed', error = $2 WHERE id = $1")
            .bind(id)
            .bind(error)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// List a user's deliveries, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Delivery>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_deliveries
             WHERE user_id = $1
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Delivery>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
