pub mod gradebook_settings;
pub mod health;
pub mod planner;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /courses/{course_id}/gradebook_settings    update (PUT)
/// /planner/items                             list (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest(
            "/courses/{course_id}/gradebook_settings",
            gradebook_settings::router(),
        )
        .nest("/planner", planner::router())
}
