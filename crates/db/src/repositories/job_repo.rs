//! Repository for the `jobs` and `job_stringing_details` tables.
//!
//! Also home of the unified "last known stringing specification" provider:
//! the latest prior job's detail wins, and only when no structured record
//! exists does the free-text notes parser run. Keeping both sources behind
//! one method means the preference cascade exists in exactly one place.

use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use restring_core::catalog::CatalogIndex;
use restring_core::lifecycle::{self, Advance};
use restring_core::notes::parse_stringing_notes;
use restring_core::resolve::LastKnownSpec;
use restring_core::types::Timestamp;

use crate::models::job::{
    CreateJob, CreateStringingDetail, Job, JobListQuery, JobStringingDetail, JobWithDetail,
    UpdateJob,
};
use crate::models::racquet::Racquet;
use crate::models::status::JobStatus;

/// Column list for `jobs` queries.
const COLUMNS: &str = "\
    id, client_id, racquet_id, stringer_id, job_type, job_status, \
    job_notes, due_date, completed_date, created_at, updated_at";

/// Column list for `job_stringing_details` queries.
const DETAIL_COLUMNS: &str = "\
    job_id, main_string_model_id, cross_string_model_id, \
    tension_main, tension_cross, price";

/// Maximum page size for job listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for job listing.
const DEFAULT_LIMIT: i64 = 50;

/// Row shape for the latest-specification query.
#[derive(Debug, FromRow)]
struct LatestSpecRow {
    job_id: Uuid,
    main_string_model_id: Option<i64>,
    cross_string_model_id: Option<i64>,
    tension_main: Option<f64>,
    tension_cross: Option<f64>,
    price: Option<f64>,
    recorded_at: Timestamp,
}

/// Provides CRUD operations for stringing jobs.
pub struct JobRepo;

impl JobRepo {
    /// Create a new pending job; for stringing jobs the 1:1 detail row is
    /// created in the same transaction, even when every field is unset.
    pub async fn create(pool: &PgPool, input: &CreateJob) -> Result<JobWithDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO jobs \
                (client_id, racquet_id, stringer_id, job_type, job_notes, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        let job = sqlx::query_as::<_, Job>(&insert_query)
            .bind(input.client_id)
            .bind(input.racquet_id)
            .bind(input.stringer_id)
            .bind(input.job_type)
            .bind(&input.job_notes)
            .bind(input.due_date)
            .fetch_one(&mut *tx)
            .await?;

        let requires_detail =
            lifecycle::JobType::from(input.job_type).requires_stringing_detail();
        let stringing_detail = if requires_detail {
            let detail = input.stringing_detail.clone().unwrap_or_default();
            Some(Self::insert_detail(&mut tx, job.id, &detail).await?)
        } else {
            None
        };

        tx.commit().await?;
        Ok(JobWithDetail {
            job,
            stringing_detail,
        })
    }

    async fn insert_detail(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        job_id: Uuid,
        detail: &CreateStringingDetail,
    ) -> Result<JobStringingDetail, sqlx::Error> {
        let query = format!(
            "INSERT INTO job_stringing_details \
                (job_id, main_string_model_id, cross_string_model_id, \
                 tension_main, tension_cross, price) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {DETAIL_COLUMNS}"
        );
        sqlx::query_as::<_, JobStringingDetail>(&query)
            .bind(job_id)
            .bind(detail.main_string_model_id)
            .bind(detail.cross_string_model_id)
            .bind(detail.tension_main)
            .bind(detail.tension_cross)
            .bind(detail.price)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a job by its ID.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a job by ID, enriched with its stringing detail.
    pub async fn find_with_detail(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Option<JobWithDetail>, sqlx::Error> {
        let job = Self::find_by_id(pool, id).await?;
        match job {
            Some(job) => {
                let stringing_detail = Self::find_detail(pool, job.id).await?;
                Ok(Some(JobWithDetail {
                    job,
                    stringing_detail,
                }))
            }
            None => Ok(None),
        }
    }

    /// Fetch a job's stringing detail row, if it has one.
    pub async fn find_detail(
        pool: &PgPool,
        job_id: Uuid,
    ) -> Result<Option<JobStringingDetail>, sqlx::Error> {
        let query = format!("SELECT {DETAIL_COLUMNS} FROM job_stringing_details WHERE job_id = $1");
        sqlx::query_as::<_, JobStringingDetail>(&query)
            .bind(job_id)
            .fetch_optional(pool)
            .await
    }

    /// List jobs with optional filters and pagination, newest first, each
    /// enriched with its stringing detail.
    pub async fn list(
        pool: &PgPool,
        params: &JobListQuery,
    ) -> Result<Vec<JobWithDetail>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        // Build the WHERE clause and track the next bind parameter index.
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx: u32 = 1;

        if params.client_id.is_some() {
            conditions.push(format!("client_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.racquet_id.is_some() {
            conditions.push(format!("racquet_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.stringer_id.is_some() {
            conditions.push(format!("stringer_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.status.is_some() {
            conditions.push(format!("job_status = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.job_type.is_some() {
            conditions.push(format!("job_type = ${bind_idx}"));
            bind_idx += 1;
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM jobs \
             {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Job>(&query);
        if let Some(client_id) = params.client_id {
            q = q.bind(client_id);
        }
        if let Some(racquet_id) = params.racquet_id {
            q = q.bind(racquet_id);
        }
        if let Some(stringer_id) = params.stringer_id {
            q = q.bind(stringer_id);
        }
        if let Some(status) = params.status {
            q = q.bind(status);
        }
        if let Some(job_type) = params.job_type {
            q = q.bind(job_type);
        }
        let jobs = q.bind(limit).bind(offset).fetch_all(pool).await?;

        let mut result = Vec::with_capacity(jobs.len());
        for job in jobs {
            let stringing_detail = Self::find_detail(pool, job.id).await?;
            result.push(JobWithDetail {
                job,
                stringing_detail,
            });
        }
        Ok(result)
    }

    /// Update a job's notes. Status is only ever changed through
    /// [`JobRepo::advance`].
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        input: &UpdateJob,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET \
                job_notes = COALESCE($2, job_notes), \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(&input.job_notes)
            .fetch_optional(pool)
            .await
    }

    /// Apply a planned status transition.
    ///
    /// The UPDATE is guarded by the status the caller planned from: if the
    /// row moved underneath us (another device advanced it first), no row
    /// matches and `None` comes back, telling the caller to re-fetch and
    /// recompute rather than retry its stale target. `completed_date` is
    /// only stamped when the plan says so, keeping re-entry into
    /// `completed` idempotent.
    pub async fn advance(
        pool: &PgPool,
        job_id: Uuid,
        from: JobStatus,
        advance: &Advance,
    ) -> Result<Option<Job>, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET \
                job_status = $3, \
                completed_date = CASE WHEN $4 THEN NOW() ELSE completed_date END, \
                updated_at = NOW() \
             WHERE id = $1 AND job_status = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(job_id)
            .bind(from)
            .bind(JobStatus::from(advance.to))
            .bind(advance.set_completed_date)
            .fetch_optional(pool)
            .await
    }

    /// The racquet's last known stringing specification.
    ///
    /// Structured job history wins; the free-text notes parser only runs
    /// when no prior stringing job exists for the racquet.
    pub async fn last_known_spec(
        pool: &PgPool,
        racquet: &Racquet,
        catalog: &CatalogIndex,
    ) -> Result<Option<LastKnownSpec>, sqlx::Error> {
        Self::last_known_spec_before(pool, racquet, catalog, None, None).await
    }

    /// Variant of [`JobRepo::last_known_spec`] that only considers jobs
    /// strictly before a reference point, used when resolving the
    /// effective specification of an existing job (its own detail is the
    /// override, not history).
    pub async fn last_known_spec_before(
        pool: &PgPool,
        racquet: &Racquet,
        catalog: &CatalogIndex,
        exclude_job: Option<Uuid>,
        before: Option<Timestamp>,
    ) -> Result<Option<LastKnownSpec>, sqlx::Error> {
        if let Some(spec) =
            Self::latest_recorded_spec(pool, racquet.id, exclude_job, before).await?
        {
            return Ok(Some(spec));
        }
        Ok(racquet
            .stringing_notes
            .as_deref()
            .and_then(|notes| parse_stringing_notes(notes, catalog)))
    }

    /// Latest job + stringing detail for a racquet, ordered by creation
    /// time descending, limit 1.
    async fn latest_recorded_spec(
        pool: &PgPool,
        racquet_id: Uuid,
        exclude_job: Option<Uuid>,
        before: Option<Timestamp>,
    ) -> Result<Option<LastKnownSpec>, sqlx::Error> {
        let row = sqlx::query_as::<_, LatestSpecRow>(
            "SELECT j.id AS job_id, d.main_string_model_id, d.cross_string_model_id, \
                    d.tension_main, d.tension_cross, d.price, j.created_at AS recorded_at \
             FROM jobs j \
             JOIN job_stringing_details d ON d.job_id = j.id \
             WHERE j.racquet_id = $1 \
               AND ($2::uuid IS NULL OR j.id <> $2) \
               AND ($3::timestamptz IS NULL OR j.created_at < $3) \
             ORDER BY j.created_at DESC, j.id DESC \
             LIMIT 1",
        )
        .bind(racquet_id)
        .bind(exclude_job)
        .bind(before)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|row| LastKnownSpec {
            job_id: Some(row.job_id),
            main_model_id: row.main_string_model_id,
            cross_model_id: row.cross_string_model_id,
            tension_main: row.tension_main,
            tension_cross: row.tension_cross,
            price: row.price,
            recorded_at: Some(row.recorded_at),
        }))
    }
}
