//! Repository for the `notification_templates` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::notification::{CreateTemplate, Template, UpdateTemplate};

const COLUMNS: &str =
    "id, template_key, channel, locale, subject, body, created_at, updated_at";

/// Provides CRUD operations for notification templates.
pub struct TemplateRepo;

impl TemplateRepo {
    /// Insert a new template, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTemplate) -> Result<Template, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_templates (template_key, channel, locale, subject, body)
             VALUES ($1, $2, COALESCE($3, 'en'), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(&input.template_key)
            .bind(&input.channel)
            .bind(&input.locale)
            .bind(&input.subject)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Look up a template by key, channel, and locale, falling back to the
    /// `en` locale when the requested one has no row.
    pub async fn find_with_fallback(
        pool: &PgPool,
        template_key: &str,
        channel: &str,
        locale: &str,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_templates
             WHERE template_key = $1 AND channel = $2 AND locale IN ($3, 'en')
             ORDER BY (locale = $3) DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(template_key)
            .bind(channel)
            .bind(locale)
            .fetch_optional(pool)
            .await
    }

    /// List all templates ordered by key, channel, locale.
    pub async fn list(pool: &PgPool) -> Result<Vec<Template>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_templates
             ORDER BY template_key, channel, locale"
        );
        sqlx::query_as::<_, Template>(&query).fetch_all(pool).await
    }

    /// Update a template's subject/body. Only non-`None` fields apply.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTemplate,
    ) -> Result<Option<Template>, sqlx::Error> {
        let query = format!(
            "UPDATE notification_templates SET
                subject = COALESCE($2, subject),
                body = COALESCE($3, body),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Template>(&query)
            .bind(id)
            .bind(&input.subject)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Delete a template by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notification_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
