//! Route definitions for string inventory.

use axum::routing::get;
use axum::Router;

use crate::handlers::inventory;
use crate::state::AppState;

/// Routes mounted at `/inventory`.
///
/// ```text
/// GET  /  -> list
/// POST /  -> upsert
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(inventory::list).post(inventory::upsert))
}
