//! Planner override entity model and DTOs.

use lms_core::plannable;
use lms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `planner_overrides` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlannerOverride {
    pub id: DbId,
    /// Record class name, e.g. `"Quizzes::Quiz"`.
    pub plannable_type: String,
    pub plannable_id: DbId,
    pub user_id: DbId,
    pub visible: bool,
    pub marked_complete: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a user's override of one record.
#[derive(Debug, Deserialize)]
pub struct UpsertPlannerOverride {
    pub plannable_type: String,
    pub plannable_id: DbId,
    pub user_id: DbId,
    pub visible: bool,
    pub marked_complete: bool,
}

impl From<PlannerOverride> for plannable::PlannerOverride {
    fn from(row: PlannerOverride) -> Self {
        Self {
            id: row.id,
            plannable_type: row.plannable_type,
            plannable_id: row.plannable_id,
            user_id: row.user_id,
            visible: row.visible,
            marked_complete: row.marked_complete,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
