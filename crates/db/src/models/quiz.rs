//! Quiz entity model and DTOs.

use lms_core::plannable::{self, ContextRef};
use lms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quizzes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Quiz {
    pub id: DbId,
    pub course_id: DbId,
    /// Set when the quiz is graded through an assignment.
    pub assignment_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub quiz_type: String,
    pub due_at: Option<Timestamp>,
    pub points_possible: Option<f64>,
    pub workflow_state: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateQuiz {
    pub course_id: DbId,
    pub assignment_id: Option<DbId>,
    pub title: String,
    pub quiz_type: Option<String>,
    pub due_at: Option<Timestamp>,
    pub points_possible: Option<f64>,
}

impl Quiz {
    pub fn into_plannable(self) -> plannable::Quiz {
        plannable::Quiz {
            id: self.id,
            context: ContextRef::Course(self.course_id),
            title: self.title,
            description: self.description,
            quiz_type: self.quiz_type,
            due_at: self.due_at,
            points_possible: self.points_possible,
            assignment_id: self.assignment_id,
            workflow_state: self.workflow_state,
        }
    }
}
