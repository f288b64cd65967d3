//! Repository for the `roles` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::role::Role;

const COLUMNS: &str = "id, name, created_at";

/// Provides lookups for roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Find a role by name. Roles are seeded by the initial migration.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE name = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Find a role by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
