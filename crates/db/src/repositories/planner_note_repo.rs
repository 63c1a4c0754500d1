//! Repository for the `planner_notes` table.

use lms_core::types::DbId;
use sqlx::PgPool;

use super::date_window;
use crate::models::planner::PlannerItemsQuery;
use crate::models::planner_note::{CreatePlannerNote, PlannerNote};

const COLUMNS: &str =
    "id, user_id, course_id, title, details, todo_date, workflow_state, created_at, updated_at";

pub struct PlannerNoteRepo;

impl PlannerNoteRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreatePlannerNote,
    ) -> Result<PlannerNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO planner_notes (user_id, course_id, title, details, todo_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlannerNote>(&query)
            .bind(input.user_id)
            .bind(input.course_id)
            .bind(&input.title)
            .bind(&input.details)
            .bind(input.todo_date)
            .fetch_one(pool)
            .await
    }

    /// A user's active notes inside the window.
    ///
    /// When `course_ids` is given, notes tied to other courses are excluded;
    /// notes with no course are always kept.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        course_ids: Option<&[DbId]>,
        window: &PlannerItemsQuery,
    ) -> Result<Vec<PlannerNote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM planner_notes
             WHERE user_id = $1 AND workflow_state = 'active'
               AND ($4::bigint[] IS NULL OR course_id IS NULL OR course_id = ANY($4))
               AND {}
             ORDER BY todo_date, id",
            date_window("todo_date", 2)
        );
        sqlx::query_as::<_, PlannerNote>(&query)
            .bind(user_id)
            .bind(window.start_date)
            .bind(window.end_date)
            .bind(course_ids)
            .fetch_all(pool)
            .await
    }
}
