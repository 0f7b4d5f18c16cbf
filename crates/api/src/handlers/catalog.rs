//! Handlers for the `/catalog` resource.
//!
//! Served entirely from the in-memory snapshot loaded at startup; these
//! never touch the database. A brand id that does not resolve is a plain
//! 404 -- reference data only disappears when seed data changes between
//! releases.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use restring_core::catalog::{CatalogEntry, CatalogIndex};
use restring_core::error::CoreError;
use restring_core::types::CatalogId;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/catalog/string-brands
pub async fn list_string_brands(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: collect_brands(&state.string_catalog),
    }))
}

/// GET /api/v1/catalog/string-brands/{id}/models
pub async fn list_string_models(
    State(state): State<AppState>,
    Path(id): Path<CatalogId>,
) -> AppResult<impl IntoResponse> {
    collect_models(&state.string_catalog, id, "StringBrand").map(|models| {
        Json(DataResponse { data: models })
    })
}

/// GET /api/v1/catalog/racquet-brands
pub async fn list_racquet_brands(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: collect_brands(&state.racquet_catalog),
    }))
}

/// GET /api/v1/catalog/racquet-brands/{id}/models
pub async fn list_racquet_models(
    State(state): State<AppState>,
    Path(id): Path<CatalogId>,
) -> AppResult<impl IntoResponse> {
    collect_models(&state.racquet_catalog, id, "RacquetBrand").map(|models| {
        Json(DataResponse { data: models })
    })
}

fn collect_brands(catalog: &CatalogIndex) -> Vec<CatalogEntry> {
    catalog.brands().cloned().collect()
}

fn collect_models(
    catalog: &CatalogIndex,
    brand_id: CatalogId,
    entity: &'static str,
) -> AppResult<Vec<CatalogEntry>> {
    if catalog.brand(brand_id).is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity,
            id: brand_id.to_string(),
        }));
    }
    Ok(catalog.models_for_brand(brand_id).cloned().collect())
}
