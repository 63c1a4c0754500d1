//! Route definitions for gradebook settings.

use axum::routing::put;
use axum::Router;

use crate::handlers::gradebook_settings;
use crate::state::AppState;

/// Routes mounted at `/courses/{course_id}/gradebook_settings`.
///
/// ```text
/// PUT /  -> update_gradebook_settings
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", put(gradebook_settings::update_gradebook_settings))
}
