//! Authorization: the authenticated-user extractor and course permission
//! checks backed by enrollments.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use lms_core::error::CoreError;
use lms_core::permissions::{is_authorized, CoursePermission, ROLE_ADMIN};
use lms_core::types::DbId;
use lms_db::models::course::Course;
use lms_db::repositories::{CourseRepo, EnrollmentRepo};
use sqlx::PgPool;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Requires any authenticated user.
///
/// Functionally equivalent to [`AuthUser`] but named explicitly so route
/// handlers read as "this route requires authentication".
///
/// ```ignore
/// async fn any_authed(RequireAuth(user): RequireAuth) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}

/// Load the course and check that `user` holds at least one of `required`
/// on it.
///
/// Site admins pass without an enrollment. Returns 404 for an unknown
/// course and 403 when no active enrollment grants a required permission.
pub async fn require_course_permission(
    pool: &PgPool,
    user: &AuthUser,
    course_id: DbId,
    required: &[CoursePermission],
) -> AppResult<Course> {
    let course = CourseRepo::find_by_id(pool, course_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Course",
            id: course_id,
        }))?;

    if user.role == ROLE_ADMIN {
        return Ok(course);
    }

    let roles = EnrollmentRepo::active_roles(pool, user.user_id, course_id).await?;
    if !is_authorized(&roles, required) {
        let names: Vec<&str> = required.iter().map(|p| p.as_str()).collect();
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Requires one of: {}",
            names.join(", ")
        ))));
    }

    Ok(course)
}
