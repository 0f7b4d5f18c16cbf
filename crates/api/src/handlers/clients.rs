//! Handlers for the `/clients` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use restring_core::error::CoreError;
use restring_db::models::client::{ClientListQuery, CreateClient, UpdateClient};
use restring_db::repositories::{ClientRepo, RacquetRepo};

use crate::error::{AppError, AppResult};
use crate::query::IncludeInactiveParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/clients?stringer_id=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ClientListQuery>,
) -> AppResult<impl IntoResponse> {
    let clients = ClientRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: clients }))
}

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let client = ClientRepo::create(&state.pool, &input).await?;

    tracing::info!(client_id = %client.id, stringer_id = %client.stringer_id, "Client created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: client })))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: id.to_string(),
        }))?;
    Ok(Json(DataResponse { data: client }))
}

/// PUT /api/v1/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateClient>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let client = ClientRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: id.to_string(),
        }))?;
    Ok(Json(DataResponse { data: client }))
}

/// DELETE /api/v1/clients/{id}
///
/// Hard delete; the client's racquets and jobs cascade away with it.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let deleted = ClientRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(client_id = %id, "Client deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: id.to_string(),
        }))
    }
}

/// GET /api/v1/clients/{id}/racquets?include_inactive=false
pub async fn list_racquets(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<IncludeInactiveParams>,
) -> AppResult<impl IntoResponse> {
    // Distinguish "no racquets" from "no such client".
    ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: id.to_string(),
        }))?;

    let racquets =
        RacquetRepo::list_for_client(&state.pool, id, params.include_inactive).await?;
    Ok(Json(DataResponse { data: racquets }))
}
