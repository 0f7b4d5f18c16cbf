//! Repository for the catalog reference tables.
//!
//! The string and racquet catalogs share a shape, so one loader serves
//! both families. The result is handed to `CatalogIndex` once per process;
//! nothing here runs on a per-request path.

use sqlx::PgPool;

use restring_core::catalog::{CatalogEntry, CatalogIndex};

use crate::models::catalog::{Brand, Model};

/// Loads catalog snapshots at startup.
pub struct CatalogRepo;

impl CatalogRepo {
    /// Load the string brand/model catalog into an index.
    pub async fn load_string_catalog(pool: &PgPool) -> Result<CatalogIndex, sqlx::Error> {
        Self::load(pool, "string_brands", "string_models").await
    }

    /// Load the racquet brand/model catalog into an index.
    pub async fn load_racquet_catalog(pool: &PgPool) -> Result<CatalogIndex, sqlx::Error> {
        Self::load(pool, "racquet_brands", "racquet_models").await
    }

    async fn load(
        pool: &PgPool,
        brands_table: &str,
        models_table: &str,
    ) -> Result<CatalogIndex, sqlx::Error> {
        let brands_query = format!("SELECT id, name FROM {brands_table} ORDER BY name, id");
        let brands = sqlx::query_as::<_, Brand>(&brands_query)
            .fetch_all(pool)
            .await?;

        let models_query =
            format!("SELECT id, brand_id, name FROM {models_table} ORDER BY name, id");
        let models = sqlx::query_as::<_, Model>(&models_query)
            .fetch_all(pool)
            .await?;

        tracing::debug!(
            brands = brands.len(),
            models = models.len(),
            table = brands_table,
            "Catalog snapshot loaded",
        );

        Ok(CatalogIndex::new(
            brands.into_iter().map(CatalogEntry::from).collect(),
            models.into_iter().map(CatalogEntry::from).collect(),
        ))
    }
}
