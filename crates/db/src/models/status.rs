//! Job status and job type enums mapping to the PostgreSQL enum types.
//!
//! Both are intentionally mirrored from `restring_core::lifecycle`: the
//! core crate owns the state machine and has no sqlx dependency, so the
//! database-facing twins live here with `From` conversions in both
//! directions. The tests below pin the wire strings to the core values.

use serde::{Deserialize, Serialize};

use restring_core::lifecycle;

/// `job_status` column value. Persisted as the literal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    PickedUp,
}

impl From<JobStatus> for lifecycle::JobStatus {
    fn from(value: JobStatus) -> Self {
        match value {
            JobStatus::Pending => lifecycle::JobStatus::Pending,
            JobStatus::InProgress => lifecycle::JobStatus::InProgress,
            JobStatus::Completed => lifecycle::JobStatus::Completed,
            JobStatus::PickedUp => lifecycle::JobStatus::PickedUp,
        }
    }
}

impl From<lifecycle::JobStatus> for JobStatus {
    fn from(value: lifecycle::JobStatus) -> Self {
        match value {
            lifecycle::JobStatus::Pending => JobStatus::Pending,
            lifecycle::JobStatus::InProgress => JobStatus::InProgress,
            lifecycle::JobStatus::Completed => JobStatus::Completed,
            lifecycle::JobStatus::PickedUp => JobStatus::PickedUp,
        }
    }
}

/// `job_type` column value. Persisted as the literal string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Stringing,
    Regrip,
    Repair,
    Other,
}

impl From<JobType> for lifecycle::JobType {
    fn from(value: JobType) -> Self {
        match value {
            JobType::Stringing => lifecycle::JobType::Stringing,
            JobType::Regrip => lifecycle::JobType::Regrip,
            JobType::Repair => lifecycle::JobType::Repair,
            JobType::Other => lifecycle::JobType::Other,
        }
    }
}

impl From<lifecycle::JobType> for JobType {
    fn from(value: lifecycle::JobType) -> Self {
        match value {
            lifecycle::JobType::Stringing => JobType::Stringing,
            lifecycle::JobType::Regrip => JobType::Regrip,
            lifecycle::JobType::Repair => JobType::Repair,
            lifecycle::JobType::Other => JobType::Other,
        }
    }
}
