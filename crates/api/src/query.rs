//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters for list endpoints that support an `include_inactive`
/// flag (racquets are soft-deleted, not removed).
#[derive(Debug, Deserialize)]
pub struct IncludeInactiveParams {
    #[serde(default)]
    pub include_inactive: bool,
}
