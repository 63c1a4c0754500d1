//! Repository for the `planner_overrides` table.

use lms_core::types::DbId;
use sqlx::PgPool;

use crate::models::planner_override::{PlannerOverride, UpsertPlannerOverride};

const COLUMNS: &str = "id, plannable_type, plannable_id, user_id, visible, marked_complete, \
    created_at, updated_at";

pub struct PlannerOverrideRepo;

impl PlannerOverrideRepo {
    /// Insert or update the override for `(plannable_type, plannable_id, user_id)`.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertPlannerOverride,
    ) -> Result<PlannerOverride, sqlx::Error> {
        let query = format!(
            "INSERT INTO planner_overrides (plannable_type, plannable_id, user_id, visible, marked_complete)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (plannable_type, plannable_id, user_id) DO UPDATE
                SET visible = EXCLUDED.visible,
                    marked_complete = EXCLUDED.marked_complete
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlannerOverride>(&query)
            .bind(&input.plannable_type)
            .bind(input.plannable_id)
            .bind(input.user_id)
            .bind(input.visible)
            .bind(input.marked_complete)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<PlannerOverride>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM planner_overrides WHERE user_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, PlannerOverride>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
