//! Handlers for the `/jobs` resource.
//!
//! Status only ever moves through the advance endpoint: the transition is
//! planned locally (core state machine) before any write, then applied
//! with a status-guarded UPDATE so a concurrent advance from another
//! device cannot double-apply. Completing a stringing job additionally
//! stamps the racquet's last stringing date and consumes inventory.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use restring_core::error::CoreError;
use restring_core::lifecycle::{self, plan_advance, plan_transition};
use restring_core::resolve::{self, SpecOverride};
use restring_db::models::job::{CreateJob, Job, JobListQuery, UpdateJob};
use restring_db::models::status::JobType;
use restring_db::repositories::{ClientRepo, InventoryRepo, JobRepo, RacquetRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /jobs/{id}/advance`.
///
/// `target` is optional (send `{}` to simply move one step forward); when
/// present it must name the immediate successor of the current status --
/// the state machine refuses skips and backward moves.
#[derive(Debug, Deserialize)]
pub struct AdvanceRequest {
    pub target: Option<restring_db::models::status::JobStatus>,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs
///
/// Create a new job in `pending` status. Stringing jobs get their 1:1
/// detail row holding only the explicitly chosen fields; defaulting from
/// preferences and history happens at read time, never at write time.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateJob>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let racquet = RacquetRepo::find_by_id(&state.pool, input.racquet_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Racquet",
            id: input.racquet_id.to_string(),
        }))?;
    if racquet.client_id != input.client_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "racquet {} belongs to a different client",
            input.racquet_id
        ))));
    }

    let created = JobRepo::create(&state.pool, &input).await?;

    tracing::info!(
        job_id = %created.job.id,
        job_type = %lifecycle::JobType::from(created.job.job_type),
        racquet_id = %created.job.racquet_id,
        "Job created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// List / get / update
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs
///
/// List jobs newest-first with optional `client_id`, `racquet_id`,
/// `stringer_id`, `status`, `job_type`, `limit`, and `offset` parameters.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<JobListQuery>,
) -> AppResult<impl IntoResponse> {
    let jobs = JobRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: jobs }))
}

/// GET /api/v1/jobs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let job = JobRepo::find_with_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Job",
            id: id.to_string(),
        }))?;
    Ok(Json(DataResponse { data: job }))
}

/// PUT /api/v1/jobs/{id}
///
/// Update the job's notes. Everything else on a job row is immutable
/// after creation except status and completion, which move through the
/// advance endpoint.
pub async fn update_notes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateJob>,
) -> AppResult<impl IntoResponse> {
    let job = JobRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Job",
            id: id.to_string(),
        }))?;
    Ok(Json(DataResponse { data: job }))
}

// ---------------------------------------------------------------------------
// Advance
// ---------------------------------------------------------------------------

/// POST /api/v1/jobs/{id}/advance
///
/// Move the job to the next status. The plan is computed from the fetched
/// row before any write (a terminal job or a skipping target is rejected
/// without touching the database); the UPDATE itself is guarded by the
/// planned-from status, so losing a race against another device yields a
/// 409 telling the caller to refresh and recompute.
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdvanceRequest>,
) -> AppResult<impl IntoResponse> {
    let job = JobRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Job",
            id: id.to_string(),
        }))?;

    let current = lifecycle::JobStatus::from(job.job_status);
    let completed_date_set = job.completed_date.is_some();
    let plan = match request.target {
        Some(target) => plan_transition(current, target.into(), completed_date_set)?,
        None => plan_advance(current, completed_date_set)?,
    };

    let updated = JobRepo::advance(&state.pool, job.id, job.job_status, &plan)
        .await?
        .ok_or(AppError::Core(CoreError::Conflict(
            "job status changed concurrently; refresh and retry".to_string(),
        )))?;

    tracing::info!(
        job_id = %updated.id,
        from = %current,
        to = %lifecycle::JobStatus::from(updated.job_status),
        "Job advanced",
    );

    if plan.to == lifecycle::JobStatus::Completed {
        apply_completion_effects(&state, &updated).await?;
    }

    Ok(Json(DataResponse { data: updated }))
}

/// Side effects of a stringing job entering `completed`: stamp the
/// racquet's last stringing date and consume one set per distinct string
/// model the job explicitly used. Missing inventory rows are a no-op, not
/// an error -- not every stringer tracks stock.
async fn apply_completion_effects(state: &AppState, job: &Job) -> AppResult<()> {
    if job.job_type != JobType::Stringing {
        return Ok(());
    }

    if let Some(completed_at) = job.completed_date {
        RacquetRepo::record_stringing(&state.pool, job.racquet_id, completed_at).await?;
    }

    if let Some(detail) = JobRepo::find_detail(&state.pool, job.id).await? {
        let mut models = vec![detail.main_string_model_id, detail.cross_string_model_id];
        models.dedup();
        for model_id in models.into_iter().flatten() {
            let consumed =
                InventoryRepo::consume_set(&state.pool, job.stringer_id, model_id).await?;
            tracing::debug!(
                job_id = %job.id,
                string_model_id = model_id,
                consumed,
                "Inventory consumption",
            );
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Effective specification
// ---------------------------------------------------------------------------

/// GET /api/v1/jobs/{id}/stringing-spec
///
/// The job's effective stringing specification, resolved at read time:
/// the stored detail acts as the explicit override, the client's current
/// preferences fill what it left unset, and only jobs created before this
/// one count as racquet history.
pub async fn stringing_spec(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let job = JobRepo::find_with_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Job",
            id: id.to_string(),
        }))?;

    if job.job.job_type != JobType::Stringing {
        return Err(AppError::Core(CoreError::Validation(format!(
            "job {id} is not a stringing job"
        ))));
    }

    let racquet = RacquetRepo::find_by_id(&state.pool, job.job.racquet_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Racquet",
            id: job.job.racquet_id.to_string(),
        }))?;
    let client = ClientRepo::find_by_id(&state.pool, job.job.client_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Client",
            id: job.job.client_id.to_string(),
        }))?;

    let override_spec = job.stringing_detail.as_ref().map(|d| SpecOverride {
        main_brand_id: None,
        main_model_id: d.main_string_model_id,
        cross_brand_id: None,
        cross_model_id: d.cross_string_model_id,
        tension_main: d.tension_main,
        tension_cross: d.tension_cross,
        price: d.price,
    });

    let history = JobRepo::last_known_spec_before(
        &state.pool,
        &racquet,
        &state.string_catalog,
        Some(job.job.id),
        Some(job.job.created_at),
    )
    .await?;

    let spec = resolve::resolve(
        &state.string_catalog,
        &client.preferences(),
        history.as_ref(),
        override_spec.as_ref(),
    );

    Ok(Json(DataResponse { data: spec }))
}
