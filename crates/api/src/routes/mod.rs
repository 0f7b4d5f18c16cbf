pub mod catalog;
pub mod clients;
pub mod health;
pub mod inventory;
pub mod jobs;
pub mod racquets;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /catalog/string-brands                   list string brands
/// /catalog/string-brands/{id}/models       models of one string brand
/// /catalog/racquet-brands                  list racquet brands
/// /catalog/racquet-brands/{id}/models      models of one racquet brand
///
/// /clients                                 list, create
/// /clients/{id}                            get, update, delete (hard, cascades)
/// /clients/{id}/racquets                   client's racquets
///
/// /racquets                                create
/// /racquets/{id}                           get, update, deactivate (soft)
/// /racquets/{id}/restore                   reactivate (POST)
/// /racquets/{id}/stringing-spec            effective spec for a new job
///                                          (GET defaults, POST with override)
/// /racquets/{id}/descriptor                QR descriptor + payload (GET)
/// /racquets/descriptor/decode              decode a scanned payload (POST)
///
/// /jobs                                    list, create
/// /jobs/{id}                               get, update notes
/// /jobs/{id}/advance                       advance job status (POST)
/// /jobs/{id}/stringing-spec                read-time effective spec (GET)
///
/// /inventory                               list, upsert stock level
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog::router())
        .nest("/clients", clients::router())
        .nest("/racquets", racquets::router())
        .nest("/jobs", jobs::router())
        .nest("/inventory", inventory::router())
}
