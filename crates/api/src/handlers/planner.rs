//! Handler for the student planner item feed.

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use lms_core::plannable::PlannableItem;
use lms_core::planner::{OverrideIndex, PlannerOptions, PlannerSerializer, PlannerUrls};
use lms_core::submission_status::SubmissionStatusIndex;
use lms_core::types::DbId;
use lms_db::models::discussion_topic::DiscussionTopic;
use lms_db::models::planner::PlannerItemsQuery;
use lms_db::repositories::{
    AssignmentRepo, DiscussionTopicRepo, EnrollmentRepo, PlannerNoteRepo, PlannerOverrideRepo,
    QuizRepo, SubmissionRepo, WikiPageRepo,
};
use sqlx::PgPool;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/planner/items?start_date=&end_date=
///
/// Serialize every plannable item visible to the user in the window,
/// ordered by planner date.
pub async fn list_planner_items(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(window): Query<PlannerItemsQuery>,
) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    let course_ids = EnrollmentRepo::active_course_ids(pool, user.user_id).await?;
    let items = load_planner_items(pool, user.user_id, &course_ids, &window).await?;

    let overrides = PlannerOverrideRepo::list_for_user(pool, user.user_id).await?;
    let overrides = OverrideIndex::new(user.user_id, overrides.into_iter().map(Into::into));

    // Only hit the submissions table when something in the batch needs it.
    // The serializer borrows the loaded index rather than querying again.
    let statuses = if items
        .iter()
        .any(|item| matches!(item, PlannableItem::Assignment(_)))
    {
        let rows =
            SubmissionRepo::list_for_user(pool, user.user_id, Some(course_ids.as_slice()))
                .await?;
        SubmissionStatusIndex::from_rows(rows.into_iter().map(Into::into))
    } else {
        SubmissionStatusIndex::default()
    };

    let urls = PlannerUrls::new(state.config.public_base_url.as_str());
    let opts = PlannerOptions {
        course_ids: Some(course_ids),
    };
    let serializer = PlannerSerializer::new(user.user_id, &statuses, &overrides, &urls, opts);
    let data = serializer.planner_items_json(&items)?;

    tracing::debug!(user_id = user.user_id, count = data.len(), "Planner items listed");

    Ok(Json(DataResponse { data }))
}

/// Gather the user's plannable items from their courses and notes, sorted
/// by planner date then id.
async fn load_planner_items(
    pool: &PgPool,
    user_id: DbId,
    course_ids: &[DbId],
    window: &PlannerItemsQuery,
) -> Result<Vec<PlannableItem>, sqlx::Error> {
    let assignments = AssignmentRepo::list_due_in_courses(pool, course_ids, window).await?;
    let assignment_ids: Vec<DbId> = assignments.iter().map(|a| a.id).collect();

    let mut quizzes: HashMap<DbId, _> = QuizRepo::list_by_assignment_ids(pool, &assignment_ids)
        .await?
        .into_iter()
        .filter_map(|q| q.assignment_id.map(|id| (id, q)))
        .collect();
    let mut topics: HashMap<DbId, _> =
        DiscussionTopicRepo::list_by_assignment_ids(pool, &assignment_ids)
            .await?
            .into_iter()
            .filter_map(|t| t.assignment_id.map(|id| (id, t)))
            .collect();
    let mut pages: HashMap<DbId, _> = WikiPageRepo::list_by_assignment_ids(pool, &assignment_ids)
        .await?
        .into_iter()
        .filter_map(|p| p.assignment_id.map(|id| (id, p)))
        .collect();

    let mut items: Vec<PlannableItem> = assignments
        .into_iter()
        .map(|a| {
            let id = a.id;
            PlannableItem::Assignment(a.into_plannable(
                quizzes.remove(&id),
                topics.remove(&id),
                pages.remove(&id),
            ))
        })
        .collect();

    items.extend(
        QuizRepo::list_ungraded_due_in_courses(pool, course_ids, window)
            .await?
            .into_iter()
            .map(|q| PlannableItem::Quiz(q.into_plannable())),
    );
    items.extend(
        DiscussionTopicRepo::list_ungraded_todo_in_courses(pool, course_ids, window)
            .await?
            .into_iter()
            .map(DiscussionTopic::into_item),
    );
    items.extend(
        DiscussionTopicRepo::list_announcements_in_courses(pool, course_ids, window)
            .await?
            .into_iter()
            .map(DiscussionTopic::into_item),
    );
    items.extend(
        WikiPageRepo::list_todo_in_courses(pool, course_ids, window)
            .await?
            .into_iter()
            .map(|p| PlannableItem::WikiPage(p.into_plannable())),
    );
    items.extend(
        PlannerNoteRepo::list_for_user(pool, user_id, Some(course_ids), window)
            .await?
            .into_iter()
            .map(|n| PlannableItem::PlannerNote(n.into_plannable())),
    );

    items.sort_by_key(|item| (item.planner_date(), item.id()));
    Ok(items)
}
