//! Repository for the `discussion_topics` table.
//!
//! Announcements share this table and are distinguished by
//! `is_announcement`.

use lms_core::types::DbId;
use sqlx::PgPool;

use super::date_window;
use crate::models::discussion_topic::{CreateDiscussionTopic, DiscussionTopic};
use crate::models::planner::PlannerItemsQuery;

const COLUMNS: &str = "id, course_id, assignment_id, title, message, todo_date, posted_at, \
    is_announcement, workflow_state, created_at, updated_at";

pub struct DiscussionTopicRepo;

impl DiscussionTopicRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateDiscussionTopic,
    ) -> Result<DiscussionTopic, sqlx::Error> {
        let query = format!(
            "INSERT INTO discussion_topics
                (course_id, assignment_id, title, message, todo_date, posted_at, is_announcement)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DiscussionTopic>(&query)
            .bind(input.course_id)
            .bind(input.assignment_id)
            .bind(&input.title)
            .bind(&input.message)
            .bind(input.todo_date)
            .bind(input.posted_at)
            .bind(input.is_announcement)
            .fetch_one(pool)
            .await
    }

    /// Active, non-announcement topics attached to any of `assignment_ids`.
    pub async fn list_by_assignment_ids(
        pool: &PgPool,
        assignment_ids: &[DbId],
    ) -> Result<Vec<DiscussionTopic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM discussion_topics
             WHERE assignment_id = ANY($1) AND NOT is_announcement
               AND workflow_state = 'active'
             ORDER BY id"
        );
        sqlx::query_as::<_, DiscussionTopic>(&query)
            .bind(assignment_ids)
            .fetch_all(pool)
            .await
    }

    /// Ungraded topics whose to-do date falls inside the window.
    pub async fn list_ungraded_todo_in_courses(
        pool: &PgPool,
        course_ids: &[DbId],
        window: &PlannerItemsQuery,
    ) -> Result<Vec<DiscussionTopic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM discussion_topics
             WHERE course_id = ANY($1) AND assignment_id IS NULL AND NOT is_announcement
               AND workflow_state = 'active' AND {}
             ORDER BY todo_date, id",
            date_window("todo_date", 2)
        );
        sqlx::query_as::<_, DiscussionTopic>(&query)
            .bind(course_ids)
            .bind(window.start_date)
            .bind(window.end_date)
            .fetch_all(pool)
            .await
    }

    /// Announcements posted inside the window.
    pub async fn list_announcements_in_courses(
        pool: &PgPool,
        course_ids: &[DbId],
        window: &PlannerItemsQuery,
    ) -> Result<Vec<DiscussionTopic>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM discussion_topics
             WHERE course_id = ANY($1) AND is_announcement
               AND workflow_state = 'active' AND {}
             ORDER BY posted_at, id",
            date_window("posted_at", 2)
        );
        sqlx::query_as::<_, DiscussionTopic>(&query)
            .bind(course_ids)
            .bind(window.start_date)
            .bind(window.end_date)
            .fetch_all(pool)
            .await
    }
}
