//! Catalog reference-data rows (string and racquet brands/models).
//!
//! These tables are seeded by migration and read once at startup into the
//! core crate's `CatalogIndex`; there are no create/update DTOs because
//! catalog maintenance happens outside this service.

use serde::Serialize;
use sqlx::FromRow;

use restring_core::catalog::CatalogEntry;
use restring_core::types::CatalogId;

/// A row from `string_brands` or `racquet_brands`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub id: CatalogId,
    pub name: String,
}

/// A row from `string_models` or `racquet_models`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Model {
    pub id: CatalogId,
    pub brand_id: CatalogId,
    pub name: String,
}

impl From<Brand> for CatalogEntry {
    fn from(brand: Brand) -> Self {
        CatalogEntry {
            id: brand.id,
            name: brand.name,
            brand_id: None,
        }
    }
}

impl From<Model> for CatalogEntry {
    fn from(model: Model) -> Self {
        CatalogEntry {
            id: model.id,
            name: model.name,
            brand_id: Some(model.brand_id),
        }
    }
}
