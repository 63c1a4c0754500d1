//! Planner note entity model and DTOs.

use lms_core::plannable;
use lms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `planner_notes` table: a free-form to-do owned by a user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlannerNote {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: Option<DbId>,
    pub title: String,
    pub details: Option<String>,
    pub todo_date: Option<Timestamp>,
    pub workflow_state: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlannerNote {
    pub user_id: DbId,
    pub course_id: Option<DbId>,
    pub title: String,
    pub details: Option<String>,
    pub todo_date: Option<Timestamp>,
}

impl PlannerNote {
    pub fn into_plannable(self) -> plannable::PlannerNote {
        plannable::PlannerNote {
            id: self.id,
            user_id: self.user_id,
            course_id: self.course_id,
            title: self.title,
            details: self.details,
            todo_date: self.todo_date,
            workflow_state: self.workflow_state,
        }
    }
}
