//! Racquet entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use restring_core::types::{CatalogId, Timestamp};

/// A row from the `racquets` table.
///
/// A racquet belongs to exactly one client and is soft-deleted via
/// `is_active` so its stringing history survives.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Racquet {
    pub id: Uuid,
    pub client_id: Uuid,
    pub brand_id: CatalogId,
    pub model_id: CatalogId,
    pub head_size: Option<f64>,
    pub string_pattern: Option<String>,
    pub weight_grams: Option<i32>,
    pub balance_point: Option<f64>,
    pub stiffness_rating: Option<i32>,
    pub length_cm: Option<f64>,
    pub notes: Option<String>,
    pub stringing_notes: Option<String>,
    pub is_active: bool,
    pub last_stringing_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new racquet.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRacquet {
    pub client_id: Uuid,
    pub brand_id: CatalogId,
    pub model_id: CatalogId,
    pub head_size: Option<f64>,
    pub string_pattern: Option<String>,
    pub weight_grams: Option<i32>,
    pub balance_point: Option<f64>,
    pub stiffness_rating: Option<i32>,
    pub length_cm: Option<f64>,
    pub notes: Option<String>,
    pub stringing_notes: Option<String>,
}

/// DTO for updating an existing racquet. Only non-`None` fields are
/// applied; ownership (`client_id`) is immutable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRacquet {
    pub brand_id: Option<CatalogId>,
    pub model_id: Option<CatalogId>,
    pub head_size: Option<f64>,
    pub string_pattern: Option<String>,
    pub weight_grams: Option<i32>,
    pub balance_point: Option<f64>,
    pub stiffness_rating: Option<i32>,
    pub length_cm: Option<f64>,
    pub notes: Option<String>,
    pub stringing_notes: Option<String>,
}
