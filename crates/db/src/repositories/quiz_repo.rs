//! Repository for the `quizzes` table.

use lms_core::types::DbId;
use sqlx::PgPool;

use super::date_window;
use crate::models::planner::PlannerItemsQuery;
use crate::models::quiz::{CreateQuiz, Quiz};

const COLUMNS: &str = "id, course_id, assignment_id, title, description, quiz_type, \
    due_at, points_possible, workflow_state, created_at, updated_at";

pub struct QuizRepo;

impl QuizRepo {
    pub async fn create(pool: &PgPool, input: &CreateQuiz) -> Result<Quiz, sqlx::Error> {
        let query = format!(
            "INSERT INTO quizzes (course_id, assignment_id, title, quiz_type, due_at, points_possible)
             VALUES ($1, $2, $3, COALESCE($4, 'assignment'), $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(input.course_id)
            .bind(input.assignment_id)
            .bind(&input.title)
            .bind(&input.quiz_type)
            .bind(input.due_at)
            .bind(input.points_possible)
            .fetch_one(pool)
            .await
    }

    /// Available quizzes attached to any of `assignment_ids`.
    pub async fn list_by_assignment_ids(
        pool: &PgPool,
        assignment_ids: &[DbId],
    ) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quizzes
             WHERE assignment_id = ANY($1) AND workflow_state = 'available'
             ORDER BY id"
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(assignment_ids)
            .fetch_all(pool)
            .await
    }

    /// Ungraded quizzes (no backing assignment) due inside the window.
    pub async fn list_ungraded_due_in_courses(
        pool: &PgPool,
        course_ids: &[DbId],
        window: &PlannerItemsQuery,
    ) -> Result<Vec<Quiz>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quizzes
             WHERE course_id = ANY($1) AND assignment_id IS NULL
               AND workflow_state = 'available' AND {}
             ORDER BY due_at, id",
            date_window("due_at", 2)
        );
        sqlx::query_as::<_, Quiz>(&query)
            .bind(course_ids)
            .bind(window.start_date)
            .bind(window.end_date)
            .fetch_all(pool)
            .await
    }
}
