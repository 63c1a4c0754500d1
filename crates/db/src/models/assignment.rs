//! Assignment entity model and DTOs.

use lms_core::plannable::{self, ContextRef};
use lms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::discussion_topic::DiscussionTopic;
use super::quiz::Quiz;
use super::wiki_page::WikiPage;

/// A row from the `assignments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<Timestamp>,
    pub points_possible: Option<f64>,
    pub submission_types: Vec<String>,
    pub workflow_state: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateAssignment {
    pub course_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<Timestamp>,
    pub points_possible: Option<f64>,
    pub submission_types: Vec<String>,
}

impl Assignment {
    /// Convert into the planner domain type, attaching whichever entities
    /// this assignment grades.
    pub fn into_plannable(
        self,
        quiz: Option<Quiz>,
        discussion_topic: Option<DiscussionTopic>,
        wiki_page: Option<WikiPage>,
    ) -> plannable::Assignment {
        plannable::Assignment {
            id: self.id,
            context: ContextRef::Course(self.course_id),
            title: self.title,
            description: self.description,
            due_at: self.due_at,
            points_possible: self.points_possible,
            submission_types: self.submission_types,
            workflow_state: self.workflow_state,
            quiz: quiz.map(Quiz::into_plannable),
            discussion_topic: discussion_topic.map(DiscussionTopic::into_plannable),
            wiki_page: wiki_page.map(WikiPage::into_plannable),
        }
    }
}
