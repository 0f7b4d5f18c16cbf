//! String inventory model and DTOs.
//!
//! Tracks how many sets of each string model a stringer has on hand.
//! Stock is decremented when a stringing job completes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use restring_core::error::CoreError;
use restring_core::types::{CatalogId, Timestamp};

/// A row from the `string_inventory` table, unique per
/// (stringer, string model).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StringInventoryItem {
    pub id: Uuid,
    pub stringer_id: Uuid,
    pub string_model_id: CatalogId,
    pub sets_in_stock: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for setting a stock level. Creates the row when the stringer has no
/// entry for the model yet.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertInventoryItem {
    pub stringer_id: Uuid,
    pub string_model_id: CatalogId,
    pub sets_in_stock: i32,
}

impl UpsertInventoryItem {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.sets_in_stock < 0 {
            return Err(CoreError::Validation(format!(
                "sets_in_stock must not be negative, got {}",
                self.sets_in_stock
            )));
        }
        Ok(())
    }
}

/// Query parameters for listing inventory.
#[derive(Debug, Deserialize)]
pub struct InventoryListQuery {
    pub stringer_id: Option<Uuid>,
}
