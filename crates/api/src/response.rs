//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope so the mobile client
//! can deserialize uniformly. Use [`DataResponse`] instead of ad-hoc
//! `serde_json::json!({ "data": ... })` to keep the payload typed.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
