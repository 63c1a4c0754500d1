//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod assignment_repo;
pub mod course_repo;
pub mod discussion_topic_repo;
pub mod enrollment_repo;
pub mod planner_note_repo;
pub mod planner_override_repo;
pub mod quiz_repo;
pub mod submission_repo;
pub mod user_repo;
pub mod wiki_page_repo;

pub use assignment_repo::AssignmentRepo;
pub use course_repo::CourseRepo;
pub use discussion_topic_repo::DiscussionTopicRepo;
pub use enrollment_repo::EnrollmentRepo;
pub use planner_note_repo::PlannerNoteRepo;
pub use planner_override_repo::PlannerOverrideRepo;
pub use quiz_repo::QuizRepo;
pub use submission_repo::SubmissionRepo;
pub use user_repo::UserRepo;
pub use wiki_page_repo::WikiPageRepo;

/// SQL predicate restricting `column` to an optional `[start, end)` window
/// bound at positions `$start_param` and `$start_param + 1`.
///
/// Rows with a `NULL` date never match.
pub(crate) fn date_window(column: &str, start_param: usize) -> String {
    let end_param = start_param + 1;
    format!(
        "{column} IS NOT NULL \
         AND (${start_param}::timestamptz IS NULL OR {column} >= ${start_param}) \
         AND (${end_param}::timestamptz IS NULL OR {column} < ${end_param})"
    )
}
