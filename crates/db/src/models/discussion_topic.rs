//! Discussion topic (and announcement) entity model and DTOs.

use lms_core::plannable::{self, Announcement, ContextRef, PlannableItem};
use lms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `discussion_topics` table. Announcements are topics with
/// `is_announcement` set.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiscussionTopic {
    pub id: DbId,
    pub course_id: DbId,
    pub assignment_id: Option<DbId>,
    pub title: String,
    pub message: Option<String>,
    pub todo_date: Option<Timestamp>,
    pub posted_at: Option<Timestamp>,
    pub is_announcement: bool,
    pub workflow_state: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateDiscussionTopic {
    pub course_id: DbId,
    pub assignment_id: Option<DbId>,
    pub title: String,
    pub message: Option<String>,
    pub todo_date: Option<Timestamp>,
    pub posted_at: Option<Timestamp>,
    #[serde(default)]
    pub is_announcement: bool,
}

impl DiscussionTopic {
    pub fn into_plannable(self) -> plannable::DiscussionTopic {
        plannable::DiscussionTopic {
            id: self.id,
            context: ContextRef::Course(self.course_id),
            title: self.title,
            message: self.message,
            todo_date: self.todo_date,
            posted_at: self.posted_at,
            assignment_id: self.assignment_id,
            is_announcement: self.is_announcement,
            workflow_state: self.workflow_state,
        }
    }

    /// A standalone planner item: an announcement or an ungraded topic.
    pub fn into_item(self) -> PlannableItem {
        let topic = self.into_plannable();
        if topic.is_announcement {
            PlannableItem::Announcement(Announcement { topic })
        } else {
            PlannableItem::DiscussionTopic(topic)
        }
    }
}
