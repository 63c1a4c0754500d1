//! Wiki page entity model and DTOs.

use lms_core::plannable::{self, ContextRef};
use lms_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `wiki_pages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WikiPage {
    pub id: DbId,
    pub course_id: DbId,
    pub assignment_id: Option<DbId>,
    pub title: String,
    pub url: String,
    pub body: Option<String>,
    pub todo_date: Option<Timestamp>,
    pub workflow_state: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Deserialize)]
pub struct CreateWikiPage {
    pub course_id: DbId,
    pub assignment_id: Option<DbId>,
    pub title: String,
    pub url: String,
    pub body: Option<String>,
    pub todo_date: Option<Timestamp>,
}

impl WikiPage {
    pub fn into_plannable(self) -> plannable::WikiPage {
        plannable::WikiPage {
            id: self.id,
            context: ContextRef::Course(self.course_id),
            title: self.title,
            url: self.url,
            body: self.body,
            todo_date: self.todo_date,
            workflow_state: self.workflow_state,
        }
    }
}
