use std::sync::Arc;

use restring_core::catalog::CatalogIndex;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: restring_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// String brand/model catalog, loaded once at startup and immutable
    /// for the process lifetime. Stale after catalog edits by design; the
    /// reference data churns rarely and a restart reloads it.
    pub string_catalog: Arc<CatalogIndex>,
    /// Racquet brand/model catalog, same snapshot semantics.
    pub racquet_catalog: Arc<CatalogIndex>,
}
