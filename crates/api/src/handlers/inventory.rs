//! Handlers for the `/inventory` resource.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;

use restring_db::models::inventory::{InventoryListQuery, UpsertInventoryItem};
use restring_db::repositories::InventoryRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/inventory?stringer_id=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<InventoryListQuery>,
) -> AppResult<impl IntoResponse> {
    let items = InventoryRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: items }))
}

/// POST /api/v1/inventory
///
/// Set the stock level for one (stringer, string model) pair, creating
/// the row on first use.
pub async fn upsert(
    State(state): State<AppState>,
    Json(input): Json<UpsertInventoryItem>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let item = InventoryRepo::upsert(&state.pool, &input).await?;

    tracing::info!(
        stringer_id = %item.stringer_id,
        string_model_id = item.string_model_id,
        sets_in_stock = item.sets_in_stock,
        "Inventory level set",
    );

    Ok(Json(DataResponse { data: item }))
}
