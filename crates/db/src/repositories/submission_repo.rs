//! Repository for the `submissions` table.

use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::submission::{Submission, UpsertSubmission};

const COLUMNS: &str = "s.id, s.assignment_id, s.user_id, s.workflow_state, s.submitted_at, \
    s.excused, s.late, s.missing, s.comment_count, s.created_at, s.updated_at";

pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert or update a user's submission for an assignment.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertSubmission,
    ) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions AS s
                (assignment_id, user_id, workflow_state, submitted_at, excused, late, missing, comment_count)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT (assignment_id, user_id) DO UPDATE
                SET workflow_state = EXCLUDED.workflow_state,
                    submitted_at = EXCLUDED.submitted_at,
                    excused = EXCLUDED.excused,
                    late = EXCLUDED.late,
                    missing = EXCLUDED.missing,
                    comment_count = EXCLUDED.comment_count
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(input.assignment_id)
            .bind(input.user_id)
            .bind(&input.workflow_state)
            .bind(input.submitted_at)
            .bind(input.excused)
            .bind(input.late)
            .bind(input.missing)
            .bind(input.comment_count)
            .fetch_one(pool)
            .await
    }

    /// All of a user's submissions, optionally restricted to assignments in
    /// `course_ids`. This is the single batched status lookup the planner
    /// performs per request.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        course_ids: Option<&[DbId]>,
    ) -> Result<Vec<Submission>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM submissions s
             JOIN assignments a ON a.id = s.assignment_id
             WHERE s.user_id = $1 AND ($2::bigint[] IS NULL OR a.course_id = ANY($2))
             ORDER BY s.assignment_id"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(user_id)
            .bind(course_ids)
            .fetch_all(pool)
            .await
    }
}
