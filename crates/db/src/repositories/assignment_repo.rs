//! Repository for the `assignments` table.

use lms_core::types::DbId;
use sqlx::PgPool;

use super::date_window;
use crate::models::assignment::{Assignment, CreateAssignment};
use crate::models::planner::PlannerItemsQuery;

const COLUMNS: &str = "id, course_id, title, description, due_at, points_possible, \
    submission_types, workflow_state, created_at, updated_at";

/// Provides CRUD operations for assignments.
pub struct AssignmentRepo;

impl AssignmentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateAssignment,
    ) -> Result<Assignment, sqlx::Error> {
        let query = format!(
            "INSERT INTO assignments (course_id, title, description, due_at, points_possible, submission_types)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_at)
            .bind(input.points_possible)
            .bind(&input.submission_types)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assignment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assignments WHERE id = $1");
        sqlx::query_as::<_, Assignment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Published assignments in `course_ids` whose due date falls inside the
    /// window, ordered by due date then id.
    pub async fn list_due_in_courses(
        pool: &PgPool,
        course_ids: &[DbId],
        window: &PlannerItemsQuery,
    ) -> Result<Vec<Assignment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assignments
             WHERE course_id = ANY($1) AND workflow_state = 'published' AND {}
             ORDER BY due_at, id",
            date_window("due_at", 2)
        );
        sqlx::query_as::<_, Assignment>(&query)
            .bind(course_ids)
            .bind(window.start_date)
            .bind(window.end_date)
            .fetch_all(pool)
            .await
    }
}
