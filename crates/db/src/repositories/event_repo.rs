//! Repository for the `events` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::event::EventRow;

const COLUMNS: &str = "id, domain, event_type, source_entity_type, source_entity_id, \
                       actor_user_id, payload, created_at";

/// Provides insert/lookup for persisted domain events.
pub struct EventRepo;

impl EventRepo {
    /// Insert an event row, returning the generated ID.
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        pool: &PgPool,
        domain: &str,
        event_type: &str,
        source_entity_type: Option<&str>,
        source_entity_id: Option<DbId>,
        actor_user_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO events (domain, event_type, source_entity_type, source_entity_id, \
             actor_user_id, payload)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id",
        )
        .bind(domain)
        .bind(event_type)
        .bind(source_entity_type)
        .bind(source_entity_id)
        .bind(actor_user_id)
        .bind(payload)
        .fetch_one(pool)
        .await
    }

    /// Look up the most recent persisted event for a `(domain, event_type)` pair.
    ///
    /// The persistence service writes events asynchronously, so there is a
    /// small window where the row may not exist yet; callers treat `None`
    /// as "no FK available".
    pub async fn latest_id(
        pool: &PgPool,
        domain: &str,
        event_type: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT id FROM events WHERE domain = $1 AND event_type = $2
             ORDER BY id DESC LIMIT 1",
        )
        .bind(domain)
        .bind(event_type)
        .fetch_optional(pool)
        .await
    }

    /// List recent events for a domain, newest first.
    pub async fn list_for_domain(
        pool: &PgPool,
        domain: &str,
        limit: i64,
    ) -> Result<Vec<EventRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE domain = $1
             ORDER BY created_at DESC
             LIMIT $2"
        );
        sqlx::query_as::<_, EventRow>(&query)
            .bind(domain)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
