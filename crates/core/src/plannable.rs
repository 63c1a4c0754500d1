//! Plannable items: everything that can appear on a student's planner.
//!
//! [`PlannableItem`] is a closed set. Assignments that stand in for a quiz,
//! wiki page or graded discussion carry the resolved entity themselves, so
//! deciding how to present an item never requires probing its capabilities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Submission type marking an assignment as the grading shell of a quiz.
pub const SUBMISSION_TYPE_QUIZ: &str = "online_quiz";
/// Submission type marking an assignment as a graded discussion.
pub const SUBMISSION_TYPE_DISCUSSION_TOPIC: &str = "discussion_topic";
/// Submission type marking an assignment as backing a wiki page.
pub const SUBMISSION_TYPE_WIKI_PAGE: &str = "wiki_page";

// ---------------------------------------------------------------------------
// Type tags
// ---------------------------------------------------------------------------

/// Public plannable type tag used by the planner API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannableType {
    DiscussionTopic,
    Announcement,
    Quiz,
    Assignment,
    WikiPage,
    PlannerNote,
}

impl PlannableType {
    /// Mapping order; reverse lookups take the first match.
    pub const ALL: [PlannableType; 6] = [
        PlannableType::DiscussionTopic,
        PlannableType::Announcement,
        PlannableType::Quiz,
        PlannableType::Assignment,
        PlannableType::WikiPage,
        PlannableType::PlannerNote,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DiscussionTopic => "discussion_topic",
            Self::Announcement => "announcement",
            Self::Quiz => "quiz",
            Self::Assignment => "assignment",
            Self::WikiPage => "wiki_page",
            Self::PlannerNote => "planner_note",
        }
    }

    /// The persisted record type behind this tag.
    pub fn record_type(self) -> RecordType {
        match self {
            Self::DiscussionTopic | Self::Announcement => RecordType::DiscussionTopic,
            Self::Quiz => RecordType::Quiz,
            Self::Assignment => RecordType::Assignment,
            Self::WikiPage => RecordType::WikiPage,
            Self::PlannerNote => RecordType::PlannerNote,
        }
    }
}

impl fmt::Display for PlannableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlannableType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown plannable type '{s}'")))
    }
}

/// Record type stored in `planner_overrides.plannable_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Assignment,
    Quiz,
    DiscussionTopic,
    WikiPage,
    PlannerNote,
}

impl RecordType {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Assignment => "Assignment",
            Self::Quiz => "Quizzes::Quiz",
            Self::DiscussionTopic => "DiscussionTopic",
            Self::WikiPage => "WikiPage",
            Self::PlannerNote => "PlannerNote",
        }
    }

    pub fn from_class_name(name: &str) -> Result<Self, CoreError> {
        [
            Self::Assignment,
            Self::Quiz,
            Self::DiscussionTopic,
            Self::WikiPage,
            Self::PlannerNote,
        ]
        .into_iter()
        .find(|r| r.class_name() == name)
        .ok_or_else(|| CoreError::Validation(format!("Unknown plannable record type '{name}'")))
    }

    /// The first public tag mapped to this record type.
    pub fn public_type(self) -> PlannableType {
        PlannableType::ALL
            .into_iter()
            .find(|t| t.record_type() == self)
            .unwrap_or(PlannableType::Assignment)
    }
}

/// Identity of a persisted plannable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlannableKey {
    pub record_type: RecordType,
    pub id: DbId,
}

impl PlannableKey {
    pub fn new(record_type: RecordType, id: DbId) -> Self {
        Self { record_type, id }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// The context an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextRef {
    Course(DbId),
    Group(DbId),
    User(DbId),
}

impl ContextRef {
    pub fn context_type(self) -> &'static str {
        match self {
            Self::Course(_) => "Course",
            Self::Group(_) => "Group",
            Self::User(_) => "User",
        }
    }

    pub fn id(self) -> DbId {
        match self {
            Self::Course(id) | Self::Group(id) | Self::User(id) => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: DbId,
    pub context: ContextRef,
    pub title: String,
    pub description: Option<String>,
    pub due_at: Option<Timestamp>,
    pub points_possible: Option<f64>,
    pub submission_types: Vec<String>,
    pub workflow_state: String,
    pub quiz: Option<Quiz>,
    pub discussion_topic: Option<DiscussionTopic>,
    pub wiki_page: Option<WikiPage>,
}

impl Assignment {
    fn has_submission_type(&self, submission_type: &str) -> bool {
        self.submission_types.iter().any(|t| t == submission_type)
    }

    /// The quiz this assignment grades, if it is a quiz shell.
    pub fn linked_quiz(&self) -> Option<&Quiz> {
        self.quiz
            .as_ref()
            .filter(|_| self.has_submission_type(SUBMISSION_TYPE_QUIZ))
    }

    pub fn linked_wiki_page(&self) -> Option<&WikiPage> {
        self.wiki_page
            .as_ref()
            .filter(|_| self.has_submission_type(SUBMISSION_TYPE_WIKI_PAGE))
    }

    pub fn linked_discussion_topic(&self) -> Option<&DiscussionTopic> {
        self.discussion_topic
            .as_ref()
            .filter(|_| self.has_submission_type(SUBMISSION_TYPE_DISCUSSION_TOPIC))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub id: DbId,
    pub context: ContextRef,
    pub title: String,
    pub description: Option<String>,
    pub quiz_type: String,
    pub due_at: Option<Timestamp>,
    pub points_possible: Option<f64>,
    pub assignment_id: Option<DbId>,
    pub workflow_state: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiscussionTopic {
    pub id: DbId,
    pub context: ContextRef,
    pub title: String,
    pub message: Option<String>,
    pub todo_date: Option<Timestamp>,
    pub posted_at: Option<Timestamp>,
    pub assignment_id: Option<DbId>,
    pub is_announcement: bool,
    pub workflow_state: String,
}

/// An announcement is rendered through its backing discussion topic.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub topic: DiscussionTopic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WikiPage {
    pub id: DbId,
    pub context: ContextRef,
    pub title: String,
    /// URL slug of the page.
    pub url: String,
    pub body: Option<String>,
    pub todo_date: Option<Timestamp>,
    pub workflow_state: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerNote {
    pub id: DbId,
    pub user_id: DbId,
    pub course_id: Option<DbId>,
    pub title: String,
    pub details: Option<String>,
    pub todo_date: Option<Timestamp>,
    pub workflow_state: String,
}

/// A per-user customization of a plannable record.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerOverride {
    pub id: DbId,
    /// Record class name, e.g. `"Quizzes::Quiz"`.
    pub plannable_type: String,
    pub plannable_id: DbId,
    pub user_id: DbId,
    pub visible: bool,
    pub marked_complete: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// PlannableItem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum PlannableItem {
    Assignment(Assignment),
    Quiz(Quiz),
    DiscussionTopic(DiscussionTopic),
    Announcement(Announcement),
    WikiPage(WikiPage),
    PlannerNote(PlannerNote),
}

/// How an item is presented once assignment shells are resolved to the
/// entity they stand for.
#[derive(Debug, Clone, Copy)]
pub enum Resolved<'a> {
    PlannerNote(&'a PlannerNote),
    Quiz(&'a Quiz),
    WikiPage(&'a WikiPage),
    Announcement(&'a Announcement),
    DiscussionTopic(&'a DiscussionTopic),
    Assignment(&'a Assignment),
}

impl PlannableItem {
    pub fn id(&self) -> DbId {
        match self {
            Self::Assignment(a) => a.id,
            Self::Quiz(q) => q.id,
            Self::DiscussionTopic(t) => t.id,
            Self::Announcement(a) => a.topic.id,
            Self::WikiPage(p) => p.id,
            Self::PlannerNote(n) => n.id,
        }
    }

    /// The date the item is placed on in the planner.
    pub fn planner_date(&self) -> Option<Timestamp> {
        match self {
            Self::Assignment(a) => a.due_at,
            Self::Quiz(q) => q.due_at,
            Self::DiscussionTopic(t) => t.todo_date.or(t.posted_at),
            Self::Announcement(a) => a.topic.posted_at,
            Self::WikiPage(p) => p.todo_date,
            Self::PlannerNote(n) => n.todo_date,
        }
    }

    pub fn context(&self) -> ContextRef {
        match self {
            Self::Assignment(a) => a.context,
            Self::Quiz(q) => q.context,
            Self::DiscussionTopic(t) => t.context,
            Self::Announcement(a) => a.topic.context,
            Self::WikiPage(p) => p.context,
            Self::PlannerNote(n) => match n.course_id {
                Some(course_id) => ContextRef::Course(course_id),
                None => ContextRef::User(n.user_id),
            },
        }
    }

    /// Key of the record this item itself is stored as.
    pub fn record_key(&self) -> PlannableKey {
        let record_type = match self {
            Self::Assignment(_) => RecordType::Assignment,
            Self::Quiz(_) => RecordType::Quiz,
            Self::DiscussionTopic(_) | Self::Announcement(_) => RecordType::DiscussionTopic,
            Self::WikiPage(_) => RecordType::WikiPage,
            Self::PlannerNote(_) => RecordType::PlannerNote,
        };
        PlannableKey::new(record_type, self.id())
    }

    /// Resolve the presentation branch. Precedence: note, quiz, wiki page,
    /// announcement, discussion topic, plain assignment.
    pub fn resolve(&self) -> Resolved<'_> {
        match self {
            Self::PlannerNote(n) => Resolved::PlannerNote(n),
            Self::Quiz(q) => Resolved::Quiz(q),
            Self::WikiPage(p) => Resolved::WikiPage(p),
            Self::Announcement(a) => Resolved::Announcement(a),
            Self::DiscussionTopic(t) => Resolved::DiscussionTopic(t),
            Self::Assignment(a) => {
                if let Some(quiz) = a.linked_quiz() {
                    Resolved::Quiz(quiz)
                } else if let Some(page) = a.linked_wiki_page() {
                    Resolved::WikiPage(page)
                } else if let Some(topic) = a.linked_discussion_topic() {
                    Resolved::DiscussionTopic(topic)
                } else {
                    Resolved::Assignment(a)
                }
            }
        }
    }
}
