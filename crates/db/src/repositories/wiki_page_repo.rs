//! Repository for the `wiki_pages` table.

use lms_core::types::DbId;
use sqlx::PgPool;

use super::date_window;
use crate::models::planner::PlannerItemsQuery;
use crate::models::wiki_page::{CreateWikiPage, WikiPage};

const COLUMNS: &str = "id, course_id, assignment_id, title, url, body, todo_date, \
    workflow_state, created_at, updated_at";

pub struct WikiPageRepo;

impl WikiPageRepo {
    pub async fn create(pool: &PgPool, input: &CreateWikiPage) -> Result<WikiPage, sqlx::Error> {
        let query = format!(
            "INSERT INTO wiki_pages (course_id, assignment_id, title, url, body, todo_date)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WikiPage>(&query)
            .bind(input.course_id)
            .bind(input.assignment_id)
            .bind(&input.title)
            .bind(&input.url)
            .bind(&input.body)
            .bind(input.todo_date)
            .fetch_one(pool)
            .await
    }

    pub async fn list_by_assignment_ids(
        pool: &PgPool,
        assignment_ids: &[DbId],
    ) -> Result<Vec<WikiPage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wiki_pages
             WHERE assignment_id = ANY($1) AND workflow_state = 'active'
             ORDER BY id"
        );
        sqlx::query_as::<_, WikiPage>(&query)
            .bind(assignment_ids)
            .fetch_all(pool)
            .await
    }

    /// Ungraded pages whose to-do date falls inside the window.
    pub async fn list_todo_in_courses(
        pool: &PgPool,
        course_ids: &[DbId],
        window: &PlannerItemsQuery,
    ) -> Result<Vec<WikiPage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wiki_pages
             WHERE course_id = ANY($1) AND assignment_id IS NULL
               AND workflow_state = 'active' AND {}
             ORDER BY todo_date, id",
            date_window("todo_date", 2)
        );
        sqlx::query_as::<_, WikiPage>(&query)
            .bind(course_ids)
            .bind(window.start_date)
            .bind(window.end_date)
            .fetch_all(pool)
            .await
    }
}
