//! Repository for the `voice_profiles` table.

use sqlx::PgPool;
use storyweave_core::types::DbId;

use crate::models::voice_profile::VoiceProfile;

const COLUMNS: &str =
    "id, owner_id, name, provider_voice_id, status, failure_reason, created_at, updated_at";

/// Provides CRUD operations for voice profiles.
pub struct VoiceProfileRepo;

impl VoiceProfileRepo {
    /// Insert a new profile in `pending` status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        name: &str,
    ) -> Result<VoiceProfile, sqlx::Error> {
        let query = format!(
            "INSERT INTO voice_profiles (owner_id, name)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VoiceProfile>(&query)
            .bind(owner_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a profile by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VoiceProfile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM voice_profiles WHERE id = $1");
        sqlx::query_as::<_, VoiceProfile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's profiles, newest first.
    pub async fn list_for_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<VoiceProfile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM voice_profiles
             WHERE owner_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, VoiceProfile>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }

    /// Set the profile status, returning the updated row.
    ///
    /// Transition legality is checked by the caller against
    /// `storyweave_core::status` before this is invoked.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
        provider_voice_id: Option<&str>,
        failure_reason: Option<&str>,
    ) -> Result<Option<VoiceProfile>, sqlx::Error> {
        let query = format!(
            "UPDATE voice_profiles SET
                status = $2,
                provider_voice_id = COALESCE($3, provider_voice_id),
                failure_reason = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VoiceProfile>(&query)
            .bind(id)
            .bind(status)
            .bind(provider_voice_id)
            .bind(failure_reason)
            .fetch_optional(pool)
            .await
    }

    /// Delete a profile by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM voice_profiles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
