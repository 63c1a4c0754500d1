//! Per-user submission status index used by the planner.
//!
//! Built once per request from the user's submission rows and then consulted
//! for every assignment in the batch.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Workflow states of a submission that still await grading.
const NEEDS_GRADING_STATES: &[&str] = &["submitted", "pending_review"];

/// One submission of the requesting user, reduced to what the index needs.
#[derive(Debug, Clone)]
pub struct SubmissionStatusRow {
    pub assignment_id: DbId,
    pub workflow_state: String,
    pub submitted_at: Option<Timestamp>,
    pub excused: bool,
    pub late: bool,
    pub missing: bool,
    pub comment_count: i64,
}

/// The seven status flags reported for an assignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionFlags {
    pub submitted: bool,
    pub excused: bool,
    pub graded: bool,
    pub late: bool,
    pub missing: bool,
    pub needs_grading: bool,
    pub has_feedback: bool,
}

/// Assignment ids grouped by submission status.
#[derive(Debug, Clone, Default)]
pub struct SubmissionStatusIndex {
    submitted: HashSet<DbId>,
    excused: HashSet<DbId>,
    graded: HashSet<DbId>,
    late: HashSet<DbId>,
    missing: HashSet<DbId>,
    needs_grading: HashSet<DbId>,
    has_feedback: HashSet<DbId>,
}

impl SubmissionStatusIndex {
    pub fn from_rows(rows: impl IntoIterator<Item = SubmissionStatusRow>) -> Self {
        let mut index = Self::default();
        for row in rows {
            let id = row.assignment_id;
            let submitted = row.submitted_at.is_some();

            if submitted {
                index.submitted.insert(id);
            }
            if row.excused {
                index.excused.insert(id);
            }
            if row.workflow_state == "graded" && !row.excused {
                index.graded.insert(id);
            }
            if row.late {
                index.late.insert(id);
            }
            if row.missing {
                index.missing.insert(id);
            }
            if submitted
                && !row.excused
                && NEEDS_GRADING_STATES.contains(&row.workflow_state.as_str())
            {
                index.needs_grading.insert(id);
            }
            if row.comment_count > 0 {
                index.has_feedback.insert(id);
            }
        }
        index
    }

    pub fn flags_for(&self, assignment_id: DbId) -> SubmissionFlags {
        SubmissionFlags {
            submitted: self.submitted.contains(&assignment_id),
            excused: self.excused.contains(&assignment_id),
            graded: self.graded.contains(&assignment_id),
            late: self.late.contains(&assignment_id),
            missing: self.missing.contains(&assignment_id),
            needs_grading: self.needs_grading.contains(&assignment_id),
            has_feedback: self.has_feedback.contains(&assignment_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn row(assignment_id: DbId, workflow_state: &str, submitted: bool) -> SubmissionStatusRow {
        SubmissionStatusRow {
            assignment_id,
            workflow_state: workflow_state.into(),
            submitted_at: submitted.then(Utc::now),
            excused: false,
            late: false,
            missing: false,
            comment_count: 0,
        }
    }

    #[test]
    fn test_submitted_ungraded_needs_grading() {
        let index = SubmissionStatusIndex::from_rows([row(1, "submitted", true)]);
        let flags = index.flags_for(1);
        assert!(flags.submitted);
        assert!(flags.needs_grading);
        assert!(!flags.graded);
    }

    #[test]
    fn test_graded_with_comments() {
        let mut graded = row(2, "graded", true);
        graded.comment_count = 3;
        let flags = SubmissionStatusIndex::from_rows([graded]).flags_for(2);
        assert!(flags.graded);
        assert!(flags.has_feedback);
        assert!(!flags.needs_grading);
    }

    #[test]
    fn test_excused_is_neither_graded_nor_pending() {
        let mut excused = row(3, "graded", true);
        excused.excused = true;
        let flags = SubmissionStatusIndex::from_rows([excused]).flags_for(3);
        assert!(flags.excused);
        assert!(!flags.graded);
        assert!(!flags.needs_grading);
    }

    #[test]
    fn test_late_and_missing_flags() {
        let mut late = row(4, "submitted", true);
        late.late = true;
        let mut missing = row(5, "unsubmitted", false);
        missing.missing = true;
        let index = SubmissionStatusIndex::from_rows([late, missing]);
        assert!(index.flags_for(4).late);
        assert!(index.flags_for(5).missing);
        assert!(!index.flags_for(5).submitted);
    }

    #[test]
    fn test_unknown_assignment_has_no_flags() {
        let index = SubmissionStatusIndex::default();
        assert_eq!(index.flags_for(99), SubmissionFlags::default());
    }
}
