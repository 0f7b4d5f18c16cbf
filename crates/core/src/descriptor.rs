//! Portable racquet descriptor codec.
//!
//! A racquet's QR label carries a self-describing JSON document: enough to
//! identify the racquet and, when a prior job exists, a point-in-time
//! snapshot of its latest stringing specification. The snapshot makes an
//! offline scan useful (reprint the last setup at the bench), but it is
//! advisory only -- callers must refresh it against the backend before
//! basing a new job on it.
//!
//! The payload is plain UTF-8 JSON, no framing, no compression. Decoding
//! arbitrary scanned text is a routine operation and must never panic;
//! anything that is not one of our descriptors comes back as a
//! [`DecodeError`] for the UI to render as "not a recognized racquet
//! code".

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{CatalogId, Timestamp};

/// Discriminator value carried in the `kind` field.
pub const DESCRIPTOR_KIND: &str = "racquet";

/// Point-in-time copy of the latest stringing specification, embedded so a
/// scan works without backend connectivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StringingSnapshot {
    pub job_id: Uuid,
    pub main_string_model_id: Option<CatalogId>,
    pub cross_string_model_id: Option<CatalogId>,
    pub tension_main: Option<f64>,
    pub tension_cross: Option<f64>,
    pub price: Option<f64>,
    pub recorded_at: Timestamp,
}

/// The scannable racquet payload.
///
/// Brand and model names are denormalized at encode time so an offline
/// scanner can label the racquet without the catalog; they are `None` when
/// the id no longer resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacquetDescriptor {
    pub kind: String,
    pub racquet_id: Uuid,
    pub client_id: Uuid,
    pub brand_id: CatalogId,
    pub brand_name: Option<String>,
    pub model_id: CatalogId,
    pub model_name: Option<String>,
    pub head_size: Option<f64>,
    pub weight_grams: Option<i32>,
    pub balance_point: Option<f64>,
    pub string_pattern: Option<String>,
    pub notes: Option<String>,
    pub stringing_notes: Option<String>,
    pub last_stringing: Option<StringingSnapshot>,
    pub generated_at: Timestamp,
}

/// Why a scanned payload is not a racquet descriptor. Expected for
/// unrelated codes; returned, never thrown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("payload is not JSON: {0}")]
    NotJson(String),

    #[error("payload is not a racquet code (kind: {found:?})")]
    WrongKind { found: Option<String> },

    #[error("racquet payload is malformed: {0}")]
    Malformed(String),
}

/// Serialize a descriptor to its QR payload text.
pub fn encode(descriptor: &RacquetDescriptor) -> Result<String, serde_json::Error> {
    serde_json::to_string(descriptor)
}

/// Parse QR payload text back into a descriptor.
///
/// The `kind` marker is checked before the full structure so that a scan
/// of some other app's JSON reports "wrong kind" rather than a random
/// missing-field message.
pub fn decode(raw: &str) -> Result<RacquetDescriptor, DecodeError> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| DecodeError::NotJson(e.to_string()))?;

    let kind = value.get("kind").and_then(|k| k.as_str());
    if kind != Some(DESCRIPTOR_KIND) {
        return Err(DecodeError::WrongKind {
            found: kind.map(str::to_string),
        });
    }

    serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))
}
