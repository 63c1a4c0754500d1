//! Handlers for per-course gradebook settings stored in the user's
//! preference map.
//!
//! Both the HTTP endpoint and [`GradebookColorStore`] go through
//! [`save_gradebook_settings`]: load, merge, validate, save once.

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use lms_core::error::CoreError;
use lms_core::gradebook_settings::{
    updated_settings, validate_preferences, GradebookSettingsUpdate,
};
use lms_core::permissions::CoursePermission;
use lms_core::status_colors::{AfterUpdateStatusColors, StatusColors};
use lms_core::types::DbId;
use lms_db::repositories::UserRepo;
use serde_json::Value;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{require_course_permission, RequireAuth};
use crate::state::AppState;

/// Either permission unlocks the gradebook.
const GRADEBOOK_PERMISSIONS: &[CoursePermission] =
    &[CoursePermission::ManageGrades, CoursePermission::ViewAllGrades];

/// PUT /api/v1/courses/{course_id}/gradebook_settings
///
/// Deep-merge the permitted `gradebook_settings` payload into the user's
/// preferences. Responds with the course's merged settings and the shared
/// colors, or 422 when the merged map fails validation.
pub async fn update_gradebook_settings(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(course_id): Path<DbId>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    require_course_permission(&state.pool, &user, course_id, GRADEBOOK_PERMISSIONS).await?;

    let update = GradebookSettingsUpdate::from_params(course_id, &body)?;
    let preferences = save_gradebook_settings(&state.pool, user.user_id, &update).await?;

    tracing::info!(
        user_id = user.user_id,
        course_id,
        settings = update.settings.len(),
        colors = update.colors.len(),
        "Gradebook settings updated",
    );

    Ok(Json(updated_settings(&preferences, course_id)))
}

/// Merge `update` into the stored preferences of `user_id` and persist the
/// result with a single write. Returns the saved preference map.
pub async fn save_gradebook_settings(
    pool: &PgPool,
    user_id: DbId,
    update: &GradebookSettingsUpdate,
) -> AppResult<Value> {
    let user_not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        })
    };

    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or_else(user_not_found)?;

    let mut preferences = user.preferences;
    update.apply(&mut preferences);

    if let Err(errors) = validate_preferences(&preferences) {
        tracing::warn!(
            user_id,
            course_id = update.course_id,
            %errors,
            "Gradebook settings rejected",
        );
        return Err(AppError::Unprocessable(errors));
    }

    let saved = UserRepo::update_preferences(pool, user_id, &preferences)
        .await?
        .ok_or_else(user_not_found)?;
    Ok(saved.preferences)
}

/// Persists status colors edited in the statuses modal into the user's
/// gradebook settings.
#[derive(Clone)]
pub struct GradebookColorStore {
    pool: PgPool,
    user_id: DbId,
    course_id: DbId,
}

impl GradebookColorStore {
    pub fn new(pool: PgPool, user_id: DbId, course_id: DbId) -> Self {
        Self {
            pool,
            user_id,
            course_id,
        }
    }
}

#[async_trait]
impl AfterUpdateStatusColors for GradebookColorStore {
    type Error = AppError;

    async fn after_update_status_colors(&self, colors: &StatusColors) -> Result<(), AppError> {
        let update = GradebookSettingsUpdate::colors_only(self.course_id, colors.to_map());
        save_gradebook_settings(&self.pool, self.user_id, &update).await?;
        tracing::debug!(
            user_id = self.user_id,
            course_id = self.course_id,
            "Status colors saved",
        );
        Ok(())
    }
}
