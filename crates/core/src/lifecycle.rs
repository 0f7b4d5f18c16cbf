//! Job status state machine.
//!
//! A job moves through a strictly linear, forward-only progression:
//! `pending -> in_progress -> completed -> picked_up`. There are no branch
//! states and no backward moves; callers only ever advance to the
//! immediate successor. The functions here compute what a transition
//! *would* do -- the repository layer applies the resulting plan in a
//! single status-guarded UPDATE.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The four-state job progression, persisted as its literal string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    PickedUp,
}

impl JobStatus {
    /// The full progression in transition order.
    pub const ORDERED: [JobStatus; 4] = [
        JobStatus::Pending,
        JobStatus::InProgress,
        JobStatus::Completed,
        JobStatus::PickedUp,
    ];

    /// The backend's literal string value for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::PickedUp => "picked_up",
        }
    }

    /// The state immediately following this one, or `None` at the terminal
    /// state.
    pub fn next(self) -> Option<JobStatus> {
        match self {
            JobStatus::Pending => Some(JobStatus::InProgress),
            JobStatus::InProgress => Some(JobStatus::Completed),
            JobStatus::Completed => Some(JobStatus::PickedUp),
            JobStatus::PickedUp => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "in_progress" => Ok(JobStatus::InProgress),
            "completed" => Ok(JobStatus::Completed),
            "picked_up" => Ok(JobStatus::PickedUp),
            other => Err(UnknownValue {
                field: "job_status",
                value: other.to_string(),
            }),
        }
    }
}

/// The closed set of job kinds. Only `stringing` jobs carry a stringing
/// detail record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Stringing,
    Regrip,
    Repair,
    Other,
}

impl JobType {
    /// The backend's literal string value for this job type.
    pub fn as_str(self) -> &'static str {
        match self {
            JobType::Stringing => "stringing",
            JobType::Regrip => "regrip",
            JobType::Repair => "repair",
            JobType::Other => "other",
        }
    }

    /// Whether jobs of this type carry a 1:1 stringing detail record.
    pub fn requires_stringing_detail(self) -> bool {
        matches!(self, JobType::Stringing)
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stringing" => Ok(JobType::Stringing),
            "regrip" => Ok(JobType::Regrip),
            "repair" => Ok(JobType::Repair),
            "other" => Ok(JobType::Other),
            other => Err(UnknownValue {
                field: "job_type",
                value: other.to_string(),
            }),
        }
    }
}

/// A string that is not a member of one of the closed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {field} value: {value:?}")]
pub struct UnknownValue {
    pub field: &'static str,
    pub value: String,
}

/// Why a requested transition was refused. Returned, never thrown: the
/// caller treats it as "no-op, refresh and retry".
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("job is already {0} and cannot advance further")]
    AlreadyTerminal(JobStatus),

    #[error("cannot move job from {from} to {to}; the only valid target is {expected}")]
    NotNextStatus {
        from: JobStatus,
        to: JobStatus,
        expected: JobStatus,
    },
}

/// What applying a valid transition must write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advance {
    /// The status the job moves to.
    pub to: JobStatus,
    /// Whether `completed_date` must be stamped by this transition.
    ///
    /// Only set when entering `completed` for the first time; re-entering
    /// `completed` (a retried update) must not overwrite the original
    /// timestamp. `updated_at` is stamped on every transition and needs no
    /// flag here.
    pub set_completed_date: bool,
}

/// Plan an advance to the immediate successor of `current`.
///
/// `completed_date_set` is whether the job already carries a completion
/// timestamp; it keeps the `completed` entry idempotent.
pub fn plan_advance(
    current: JobStatus,
    completed_date_set: bool,
) -> Result<Advance, TransitionError> {
    let to = current
        .next()
        .ok_or(TransitionError::AlreadyTerminal(current))?;
    Ok(Advance {
        to,
        set_completed_date: to == JobStatus::Completed && !completed_date_set,
    })
}

/// Plan a transition to an explicit `target`, rejecting anything that is
/// not the immediate successor of `current` (no skips, no backward moves).
pub fn plan_transition(
    current: JobStatus,
    target: JobStatus,
    completed_date_set: bool,
) -> Result<Advance, TransitionError> {
    let advance = plan_advance(current, completed_date_set)?;
    if advance.to != target {
        return Err(TransitionError::NotNextStatus {
            from: current,
            to: target,
            expected: advance.to,
        });
    }
    Ok(advance)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -----------------------------------------------------------------------
    // Progression order
    // -----------------------------------------------------------------------

    #[test]
    fn advancing_from_pending_visits_every_state_in_order() {
        let mut current = JobStatus::Pending;
        let mut visited = Vec::new();
        while let Ok(advance) = plan_advance(current, false) {
            visited.push(advance.to);
            current = advance.to;
        }
        assert_eq!(
            visited,
            vec![
                JobStatus::InProgress,
                JobStatus::Completed,
                JobStatus::PickedUp
            ]
        );
    }

    #[test]
    fn picked_up_is_terminal() {
        assert!(JobStatus::PickedUp.is_terminal());
        assert_matches!(
            plan_advance(JobStatus::PickedUp, true),
            Err(TransitionError::AlreadyTerminal(JobStatus::PickedUp))
        );
    }

    #[test]
    fn non_terminal_states_are_not_terminal() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::InProgress.is_terminal());
        assert!(!JobStatus::Completed.is_terminal());
    }

    // -----------------------------------------------------------------------
    // Explicit targets
    // -----------------------------------------------------------------------

    #[test]
    fn skipping_a_state_is_rejected() {
        // in_progress -> picked_up skips completed.
        assert_matches!(
            plan_transition(JobStatus::InProgress, JobStatus::PickedUp, false),
            Err(TransitionError::NotNextStatus {
                from: JobStatus::InProgress,
                to: JobStatus::PickedUp,
                expected: JobStatus::Completed,
            })
        );
    }

    #[test]
    fn moving_backward_is_rejected() {
        assert_matches!(
            plan_transition(JobStatus::Completed, JobStatus::InProgress, true),
            Err(TransitionError::NotNextStatus { .. })
        );
    }

    #[test]
    fn immediate_successor_is_accepted() {
        let advance =
            plan_transition(JobStatus::Pending, JobStatus::InProgress, false).unwrap();
        assert_eq!(advance.to, JobStatus::InProgress);
        assert!(!advance.set_completed_date);
    }

    // -----------------------------------------------------------------------
    // completed_date idempotency
    // -----------------------------------------------------------------------

    #[test]
    fn entering_completed_stamps_the_completion_date() {
        let advance = plan_advance(JobStatus::InProgress, false).unwrap();
        assert_eq!(advance.to, JobStatus::Completed);
        assert!(advance.set_completed_date);
    }

    #[test]
    fn reentering_completed_preserves_an_existing_date() {
        let advance = plan_advance(JobStatus::InProgress, true).unwrap();
        assert_eq!(advance.to, JobStatus::Completed);
        assert!(!advance.set_completed_date);
    }

    #[test]
    fn leaving_completed_never_touches_the_date() {
        let advance = plan_advance(JobStatus::Completed, true).unwrap();
        assert_eq!(advance.to, JobStatus::PickedUp);
        assert!(!advance.set_completed_date);
    }

    // -----------------------------------------------------------------------
    // String round-trips
    // -----------------------------------------------------------------------

    #[test]
    fn status_string_round_trip() {
        for status in JobStatus::ORDERED {
            assert_eq!(status.as_str().parse::<JobStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_string_is_rejected() {
        let err = "cancelled".parse::<JobStatus>().unwrap_err();
        assert_eq!(err.value, "cancelled");
    }

    #[test]
    fn job_type_string_round_trip() {
        for job_type in [
            JobType::Stringing,
            JobType::Regrip,
            JobType::Repair,
            JobType::Other,
        ] {
            assert_eq!(job_type.as_str().parse::<JobType>().unwrap(), job_type);
        }
    }

    #[test]
    fn only_stringing_jobs_carry_a_detail() {
        assert!(JobType::Stringing.requires_stringing_detail());
        assert!(!JobType::Regrip.requires_stringing_detail());
        assert!(!JobType::Repair.requires_stringing_detail());
        assert!(!JobType::Other.requires_stringing_detail());
    }

    #[test]
    fn serde_uses_the_wire_strings() {
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
        let parsed: JobStatus = serde_json::from_str("\"picked_up\"").unwrap();
        assert_eq!(parsed, JobStatus::PickedUp);
    }
}
