//! Route definitions for the catalog reference data.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/catalog`. Served from the in-memory session
/// snapshot, not the database.
///
/// ```text
/// GET /string-brands               -> list_string_brands
/// GET /string-brands/{id}/models   -> list_string_models
/// GET /racquet-brands              -> list_racquet_brands
/// GET /racquet-brands/{id}/models  -> list_racquet_models
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/string-brands", get(catalog::list_string_brands))
        .route(
            "/string-brands/{id}/models",
            get(catalog::list_string_models),
        )
        .route("/racquet-brands", get(catalog::list_racquet_brands))
        .route(
            "/racquet-brands/{id}/models",
            get(catalog::list_racquet_models),
        )
}
