//! Job entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use restring_core::error::CoreError;
use restring_core::types::{CatalogId, Timestamp};

use super::client::validate_tension;
use super::status::{JobStatus, JobType};

/// A row from the `jobs` table.
///
/// After creation only `job_status`, `job_notes`, and `completed_date`
/// mutate; a job is never reopened to an earlier status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: Uuid,
    pub client_id: Uuid,
    pub racquet_id: Uuid,
    pub stringer_id: Uuid,
    pub job_type: JobType,
    pub job_status: JobStatus,
    pub job_notes: Option<String>,
    pub due_date: Option<Timestamp>,
    pub completed_date: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `job_stringing_details` table: the 1:1 dependent record
/// every stringing-type job carries.
///
/// Fields hold only what was explicitly chosen for this job; unset fields
/// are filled at read time by the preference cascade, never written back.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobStringingDetail {
    pub job_id: Uuid,
    pub main_string_model_id: Option<CatalogId>,
    pub cross_string_model_id: Option<CatalogId>,
    pub tension_main: Option<f64>,
    pub tension_cross: Option<f64>,
    pub price: Option<f64>,
}

/// A job enriched with its stringing detail (absent for non-stringing
/// jobs).
#[derive(Debug, Clone, Serialize)]
pub struct JobWithDetail {
    #[serde(flatten)]
    pub job: Job,
    pub stringing_detail: Option<JobStringingDetail>,
}

/// DTO for creating a new job.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateJob {
    pub client_id: Uuid,
    pub racquet_id: Uuid,
    pub stringer_id: Uuid,
    pub job_type: JobType,
    pub job_notes: Option<String>,
    pub due_date: Option<Timestamp>,
    /// Explicit stringing choices for this job. Allowed only when
    /// `job_type` is `stringing`; all fields may be left unset.
    pub stringing_detail: Option<CreateStringingDetail>,
}

impl CreateJob {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.stringing_detail.is_some() && self.job_type != JobType::Stringing {
            return Err(CoreError::Validation(format!(
                "stringing_detail is only allowed on stringing jobs, not {:?} jobs",
                self.job_type
            )));
        }
        if let Some(detail) = &self.stringing_detail {
            detail.validate()?;
        }
        Ok(())
    }
}

/// Explicit stringing choices captured at job creation. Every field is
/// optional; partially unset stringing fields are a valid job.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStringingDetail {
    pub main_string_model_id: Option<CatalogId>,
    pub cross_string_model_id: Option<CatalogId>,
    pub tension_main: Option<f64>,
    pub tension_cross: Option<f64>,
    pub price: Option<f64>,
}

impl CreateStringingDetail {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_tension("tension_main", self.tension_main)?;
        validate_tension("tension_cross", self.tension_cross)
    }
}

/// DTO for updating a job. Status moves only through the advance
/// operation, so notes are the single patchable field.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateJob {
    pub job_notes: Option<String>,
}

/// Query parameters for listing jobs.
#[derive(Debug, Default, Deserialize)]
pub struct JobListQuery {
    pub client_id: Option<Uuid>,
    pub racquet_id: Option<Uuid>,
    pub stringer_id: Option<Uuid>,
    pub status: Option<JobStatus>,
    pub job_type: Option<JobType>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}
