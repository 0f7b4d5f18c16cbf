//! Handlers for the `/racquets` resource: CRUD, effective stringing
//! specification, and the scannable descriptor.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use restring_core::descriptor::{
    self, RacquetDescriptor, StringingSnapshot, DESCRIPTOR_KIND,
};
use restring_core::error::CoreError;
use restring_core::resolve::{self, EffectiveSpec, LastKnownSpec, SpecOverride};
use restring_db::models::client::Client;
use restring_db::models::racquet::{CreateRacquet, Racquet, UpdateRacquet};
use restring_db::repositories::{ClientRepo, JobRepo, RacquetRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for `GET /racquets/{id}/descriptor`: the structured
/// descriptor plus the exact text to encode into the QR label.
#[derive(Debug, Serialize)]
pub struct DescriptorResponse {
    pub descriptor: RacquetDescriptor,
    pub payload: String,
}

/// Request body for `POST /racquets/descriptor/decode`.
#[derive(Debug, Deserialize)]
pub struct DecodeRequest {
    pub payload: String,
}

/// Response body for a decoded scan: the fresh racquet row, the advisory
/// snapshot that was embedded in the code, and the specification as the
/// backend resolves it right now. The embedded snapshot is never trusted
/// for a new job; `current_spec` is.
#[derive(Debug, Serialize)]
pub struct DecodedDescriptorResponse {
    pub racquet: Racquet,
    pub embedded_snapshot: Option<StringingSnapshot>,
    pub current_spec: EffectiveSpec,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_racquet(state: &AppState, id: Uuid) -> AppResult<Racquet> {
    RacquetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Racquet",
            id: id.to_string(),
        }))
}

async fn find_owner(state: &AppState, racquet: &Racquet) -> AppResult<Client> {
    ClientRepo::find_by_id(&state.pool, racquet.client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: racquet.client_id.to_string(),
        }))
}

/// Resolve the effective specification a new job for this racquet would
/// default to, with an optional explicit override layered on top.
async fn resolve_spec(
    state: &AppState,
    racquet: &Racquet,
    override_spec: Option<&SpecOverride>,
) -> AppResult<EffectiveSpec> {
    let client = find_owner(state, racquet).await?;
    let history = JobRepo::last_known_spec(&state.pool, racquet, &state.string_catalog).await?;
    Ok(resolve::resolve(
        &state.string_catalog,
        &client.preferences(),
        history.as_ref(),
        override_spec,
    ))
}

/// The embedded snapshot comes only from structured job history; a spec
/// recovered from free-text notes has no job to reference.
fn snapshot_from(history: Option<LastKnownSpec>) -> Option<StringingSnapshot> {
    let spec = history?;
    let job_id = spec.job_id?;
    let recorded_at = spec.recorded_at?;
    Some(StringingSnapshot {
        job_id,
        main_string_model_id: spec.main_model_id,
        cross_string_model_id: spec.cross_model_id,
        tension_main: spec.tension_main,
        tension_cross: spec.tension_cross,
        price: spec.price,
        recorded_at,
    })
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/racquets
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateRacquet>,
) -> AppResult<impl IntoResponse> {
    // Surface a missing owner as a 404 instead of a raw FK violation.
    ClientRepo::find_by_id(&state.pool, input.client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: input.client_id.to_string(),
        }))?;

    let racquet = RacquetRepo::create(&state.pool, &input).await?;

    tracing::info!(racquet_id = %racquet.id, client_id = %racquet.client_id, "Racquet created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: racquet })))
}

/// GET /api/v1/racquets/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let racquet = find_racquet(&state, id).await?;
    Ok(Json(DataResponse { data: racquet }))
}

/// PUT /api/v1/racquets/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateRacquet>,
) -> AppResult<impl IntoResponse> {
    let racquet = RacquetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Racquet",
            id: id.to_string(),
        }))?;
    Ok(Json(DataResponse { data: racquet }))
}

/// DELETE /api/v1/racquets/{id}
///
/// Soft delete: the racquet disappears from default listings but keeps
/// its stringing history.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let deactivated = RacquetRepo::deactivate(&state.pool, id).await?;
    if deactivated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Racquet",
            id: id.to_string(),
        }))
    }
}

/// POST /api/v1/racquets/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let restored = RacquetRepo::restore(&state.pool, id).await?;
    if !restored {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Racquet",
            id: id.to_string(),
        }));
    }
    let racquet = find_racquet(&state, id).await?;
    Ok(Json(DataResponse { data: racquet }))
}

// ---------------------------------------------------------------------------
// Effective stringing specification
// ---------------------------------------------------------------------------

/// GET /api/v1/racquets/{id}/stringing-spec
///
/// What a new job for this racquet would use, before any explicit choice:
/// client preferences first, racquet history as fallback, field by field.
pub async fn stringing_spec(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let racquet = find_racquet(&state, id).await?;
    let spec = resolve_spec(&state, &racquet, None).await?;
    Ok(Json(DataResponse { data: spec }))
}

/// POST /api/v1/racquets/{id}/stringing-spec
///
/// Live preview for the job-creation form: the request body carries the
/// user's picks so far and the response shows the fully resolved
/// specification. Nothing is persisted.
pub async fn preview_stringing_spec(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(override_spec): Json<SpecOverride>,
) -> AppResult<impl IntoResponse> {
    let racquet = find_racquet(&state, id).await?;
    let spec = resolve_spec(&state, &racquet, Some(&override_spec)).await?;
    Ok(Json(DataResponse { data: spec }))
}

// ---------------------------------------------------------------------------
// Descriptor
// ---------------------------------------------------------------------------

/// GET /api/v1/racquets/{id}/descriptor
///
/// Build the scannable payload for this racquet, embedding the latest
/// recorded stringing snapshot when one exists.
pub async fn descriptor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let racquet = find_racquet(&state, id).await?;
    let history =
        JobRepo::last_known_spec(&state.pool, &racquet, &state.string_catalog).await?;

    let descriptor = RacquetDescriptor {
        kind: DESCRIPTOR_KIND.to_string(),
        racquet_id: racquet.id,
        client_id: racquet.client_id,
        brand_id: racquet.brand_id,
        brand_name: state
            .racquet_catalog
            .brand(racquet.brand_id)
            .map(|b| b.name.clone()),
        model_id: racquet.model_id,
        model_name: state
            .racquet_catalog
            .model(racquet.model_id)
            .map(|m| m.name.clone()),
        head_size: racquet.head_size,
        weight_grams: racquet.weight_grams,
        balance_point: racquet.balance_point,
        string_pattern: racquet.string_pattern.clone(),
        notes: racquet.notes.clone(),
        stringing_notes: racquet.stringing_notes.clone(),
        last_stringing: snapshot_from(history),
        generated_at: Utc::now(),
    };

    let payload = descriptor::encode(&descriptor)
        .map_err(|e| AppError::InternalError(format!("descriptor encoding failed: {e}")))?;

    Ok(Json(DataResponse {
        data: DescriptorResponse {
            descriptor,
            payload,
        },
    }))
}

/// POST /api/v1/racquets/descriptor/decode
///
/// Resolve a scanned payload back to its racquet. Unrecognized payloads
/// come back as 422, a recognized racquet that no longer exists as 404.
/// The embedded snapshot is returned verbatim but the specification is
/// re-resolved against the backend before anything trusts it.
pub async fn decode_descriptor(
    State(state): State<AppState>,
    Json(input): Json<DecodeRequest>,
) -> AppResult<impl IntoResponse> {
    let decoded = descriptor::decode(&input.payload)?;

    let racquet = RacquetRepo::find_by_id(&state.pool, decoded.racquet_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Racquet",
            id: decoded.racquet_id.to_string(),
        }))?;

    let current_spec = resolve_spec(&state, &racquet, None).await?;

    tracing::debug!(racquet_id = %racquet.id, "Scanned descriptor resolved");

    Ok(Json(DataResponse {
        data: DecodedDescriptorResponse {
            racquet,
            embedded_snapshot: decoded.last_stringing,
            current_spec,
        },
    }))
}
