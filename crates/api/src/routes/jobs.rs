//! Route definitions for stringing jobs.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::jobs;
use crate::state::AppState;

/// Routes mounted at `/jobs`.
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create
/// GET    /{id}                 -> get_by_id
/// PUT    /{id}                 -> update_notes
/// POST   /{id}/advance         -> advance
/// GET    /{id}/stringing-spec  -> stringing_spec
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(jobs::list).post(jobs::create))
        .route("/{id}", get(jobs::get_by_id).put(jobs::update_notes))
        .route("/{id}/advance", post(jobs::advance))
        .route("/{id}/stringing-spec", get(jobs::stringing_spec))
}
