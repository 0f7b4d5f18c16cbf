//! Route definitions for racquets and their scannable descriptors.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::racquets;
use crate::state::AppState;

/// Routes mounted at `/racquets`.
///
/// ```text
/// POST   /                      -> create
/// GET    /{id}                  -> get_by_id
/// PUT    /{id}                  -> update
/// DELETE /{id}                  -> deactivate
/// POST   /{id}/restore          -> restore
/// GET    /{id}/stringing-spec   -> stringing_spec (stored defaults)
/// POST   /{id}/stringing-spec   -> preview_stringing_spec (with override)
/// GET    /{id}/descriptor       -> descriptor
/// POST   /descriptor/decode     -> decode_descriptor
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(racquets::create))
        .route(
            "/{id}",
            get(racquets::get_by_id)
                .put(racquets::update)
                .delete(racquets::deactivate),
        )
        .route("/{id}/restore", post(racquets::restore))
        .route(
            "/{id}/stringing-spec",
            get(racquets::stringing_spec).post(racquets::preview_stringing_spec),
        )
        .route("/{id}/descriptor", get(racquets::descriptor))
        .route("/descriptor/decode", post(racquets::decode_descriptor))
}
