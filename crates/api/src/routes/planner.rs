use axum::routing::get;
use axum::Router;

use crate::handlers::planner;
use crate::state::AppState;

/// Routes mounted at `/planner`.
///
/// ```text
/// GET /items  -> list_planner_items
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/items", get(planner::list_planner_items))
}
