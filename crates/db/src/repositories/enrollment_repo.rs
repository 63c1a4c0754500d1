//! Repository for the `enrollments` table.

use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::enrollment::{CreateEnrollment, Enrollment};

const COLUMNS: &str = "id, user_id, course_id, role, workflow_state, created_at, updated_at";

/// Provides enrollment lookups used for authorization and planner scoping.
pub struct EnrollmentRepo;

impl EnrollmentRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateEnrollment,
    ) -> Result<Enrollment, sqlx::Error> {
        let query = format!(
            "INSERT INTO enrollments (user_id, course_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Enrollment>(&query)
            .bind(input.user_id)
            .bind(input.course_id)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Roles of a user's active enrollments in a course.
    pub async fn active_roles(
        pool: &PgPool,
        user_id: DbId,
        course_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT role FROM enrollments \
             WHERE user_id = $1 AND course_id = $2 AND workflow_state = 'active' \
             ORDER BY role",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_all(pool)
        .await
    }

    /// Ids of the courses a user is actively enrolled in, in any role.
    pub async fn active_course_ids(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT DISTINCT course_id FROM enrollments \
             WHERE user_id = $1 AND workflow_state = 'active' \
             ORDER BY course_id",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
