//! Repository for the `string_inventory` table.

use sqlx::PgPool;
use uuid::Uuid;

use restring_core::types::CatalogId;

use crate::models::inventory::{InventoryListQuery, StringInventoryItem, UpsertInventoryItem};

/// Column list for `string_inventory` queries.
const COLUMNS: &str =
    "id, stringer_id, string_model_id, sets_in_stock, created_at, updated_at";

/// Provides stock operations for string inventory.
pub struct InventoryRepo;

impl InventoryRepo {
    /// Set the stock level for a (stringer, string model) pair, creating
    /// the row if needed.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertInventoryItem,
    ) -> Result<StringInventoryItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO string_inventory (stringer_id, string_model_id, sets_in_stock) \
             VALUES ($1, $2, $3) \
             ON CONFLICT ON CONSTRAINT uq_string_inventory_stringer_model \
             DO UPDATE SET sets_in_stock = EXCLUDED.sets_in_stock, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StringInventoryItem>(&query)
            .bind(input.stringer_id)
            .bind(input.string_model_id)
            .bind(input.sets_in_stock)
            .fetch_one(pool)
            .await
    }

    /// List inventory rows, optionally filtered to one stringer.
    pub async fn list(
        pool: &PgPool,
        params: &InventoryListQuery,
    ) -> Result<Vec<StringInventoryItem>, sqlx::Error> {
        let query = if params.stringer_id.is_some() {
            format!(
                "SELECT {COLUMNS} FROM string_inventory \
                 WHERE stringer_id = $1 \
                 ORDER BY string_model_id"
            )
        } else {
            format!("SELECT {COLUMNS} FROM string_inventory ORDER BY stringer_id, string_model_id")
        };
        let mut q = sqlx::query_as::<_, StringInventoryItem>(&query);
        if let Some(stringer_id) = params.stringer_id {
            q = q.bind(stringer_id);
        }
        q.fetch_all(pool).await
    }

    /// Consume one set of a string model from a stringer's stock.
    ///
    /// Stock never goes below zero; a stringer without a tracked row (or
    /// with empty stock) is a no-op and returns `false`.
    pub async fn consume_set(
        pool: &PgPool,
        stringer_id: Uuid,
        string_model_id: CatalogId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE string_inventory \
             SET sets_in_stock = sets_in_stock - 1, updated_at = NOW() \
             WHERE stringer_id = $1 AND string_model_id = $2 AND sets_in_stock > 0",
        )
        .bind(stringer_id)
        .bind(string_model_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
