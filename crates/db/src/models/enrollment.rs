//! Enrollment entity model and DTOs.

use lms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `enrollments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Enrollment {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: DbId,
    /// One of the `ENROLLMENT_*` constants in `lms_core::permissions`.
    pub role: String,
    pub workflow_state: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateEnrollment {
    pub user_id: DbId,
    pub course_id: DbId,
    pub role: String,
}
