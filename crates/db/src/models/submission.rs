//! Submission entity model and DTOs.

use lms_core::submission_status::SubmissionStatusRow;
use lms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Submission {
    pub id: DbId,
    pub assignment_id: DbId,
    pub user_id: DbId,
    pub workflow_state: String,
    pub submitted_at: Option<Timestamp>,
    pub excused: bool,
    pub late: bool,
    pub missing: bool,
    pub comment_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a user's submission state on an assignment.
#[derive(Debug, Deserialize)]
pub struct UpsertSubmission {
    pub assignment_id: DbId,
    pub user_id: DbId,
    pub workflow_state: String,
    pub submitted_at: Option<Timestamp>,
    #[serde(default)]
    pub excused: bool,
    #[serde(default)]
    pub late: bool,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub comment_count: i32,
}

impl From<Submission> for SubmissionStatusRow {
    fn from(row: Submission) -> Self {
        Self {
            assignment_id: row.assignment_id,
            workflow_state: row.workflow_state,
            submitted_at: row.submitted_at,
            excused: row.excused,
            late: row.late,
            missing: row.missing,
            comment_count: i64::from(row.comment_count),
        }
    }
}
