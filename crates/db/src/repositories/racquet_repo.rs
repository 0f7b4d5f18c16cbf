//! Repository for the `racquets` table.

use sqlx::PgPool;
use uuid::Uuid;

use restring_core::types::Timestamp;

use crate::models::racquet::{CreateRacquet, Racquet, UpdateRacquet};

/// Column list for `racquets` queries.
const COLUMNS: &str = "\
    id, client_id, brand_id, model_id, head_size, string_pattern, \
    weight_grams, balance_point, stiffness_rating, length_cm, \
    notes, stringing_notes, is_active, last_stringing_date, \
    created_at, updated_at";

/// Provides CRUD operations for racquets.
pub struct RacquetRepo;

impl RacquetRepo {
    /// Insert a new racquet for a client.
    pub async fn create(pool: &PgPool, input: &CreateRacquet) -> Result<Racquet, sqlx::Error> {
        let query = format!(
            "INSERT INTO racquets \
                (client_id, brand_id, model_id, head_size, string_pattern, \
                 weight_grams, balance_point, stiffness_rating, length_cm, \
                 notes, stringing_notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Racquet>(&query)
            .bind(input.client_id)
            .bind(input.brand_id)
            .bind(input.model_id)
            .bind(input.head_size)
            .bind(&input.string_pattern)
            .bind(input.weight_grams)
            .bind(input.balance_point)
            .bind(input.stiffness_rating)
            .bind(input.length_cm)
            .bind(&input.notes)
            .bind(&input.stringing_notes)
            .fetch_one(pool)
            .await
    }

    /// Find a racquet by its ID, regardless of active flag.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Racquet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM racquets WHERE id = $1");
        sqlx::query_as::<_, Racquet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a client's racquets, optionally including deactivated ones.
    pub async fn list_for_client(
        pool: &PgPool,
        client_id: Uuid,
        include_inactive: bool,
    ) -> Result<Vec<Racquet>, sqlx::Error> {
        let query = if include_inactive {
            format!(
                "SELECT {COLUMNS} FROM racquets \
                 WHERE client_id = $1 \
                 ORDER BY created_at, id"
            )
        } else {
            format!(
                "SELECT {COLUMNS} FROM racquets \
                 WHERE client_id = $1 AND is_active = TRUE \
                 ORDER BY created_at, id"
            )
        };
        sqlx::query_as::<_, Racquet>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Update a racquet. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: &UpdateRacquet,
    ) -> Result<Option<Racquet>, sqlx::Error> {
        let query = format!(
            "UPDATE racquets SET \
                brand_id = COALESCE($2, brand_id), \
                model_id = COALESCE($3, model_id), \
                head_size = COALESCE($4, head_size), \
                string_pattern = COALESCE($5, string_pattern), \
                weight_grams = COALESCE($6, weight_grams), \
                balance_point = COALESCE($7, balance_point), \
                stiffness_rating = COALESCE($8, stiffness_rating), \
                length_cm = COALESCE($9, length_cm), \
                notes = COALESCE($10, notes), \
                stringing_notes = COALESCE($11, stringing_notes), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Racquet>(&query)
            .bind(id)
            .bind(input.brand_id)
            .bind(input.model_id)
            .bind(input.head_size)
            .bind(&input.string_pattern)
            .bind(input.weight_grams)
            .bind(input.balance_point)
            .bind(input.stiffness_rating)
            .bind(input.length_cm)
            .bind(&input.notes)
            .bind(&input.stringing_notes)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a racquet, keeping its history. Returns `false` when it
    /// does not exist or is already inactive.
    pub async fn deactivate(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE racquets SET is_active = FALSE, updated_at = NOW() \
             WHERE id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reactivate a soft-deleted racquet. Returns `false` when it does not
    /// exist or is already active.
    pub async fn restore(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE racquets SET is_active = TRUE, updated_at = NOW() \
             WHERE id = $1 AND is_active = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stamp the racquet's last stringing date when a stringing job
    /// completes.
    pub async fn record_stringing(
        pool: &PgPool,
        id: Uuid,
        completed_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE racquets SET last_stringing_date = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(completed_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}
