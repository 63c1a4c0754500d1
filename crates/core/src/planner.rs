//! Planner item serialization.
//!
//! Renders a batch of [`PlannableItem`]s into the uniform planner item shape:
//!
//! ```text
//! { context_type, course_id | group_id | user_id,
//!   plannable_id, plannable_date, visible_in_planner, planner_override,
//!   submissions, plannable_type, plannable, html_url }
//! ```
//!
//! Lookups are supplied by the caller through [`SubmissionStatusSource`] and
//! [`PlannerOverrideSource`], so the serializer itself never touches storage.

use std::borrow::Cow;
use std::cell::OnceCell;
use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::error::CoreError;
use crate::plannable::{
    Assignment, ContextRef, DiscussionTopic, PlannableItem, PlannableKey, PlannableType,
    PlannerNote, PlannerOverride, Quiz, RecordType, Resolved, WikiPage,
};
use crate::submission_status::{SubmissionFlags, SubmissionStatusIndex};
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Lookup seams
// ---------------------------------------------------------------------------

/// Options forwarded to the submission status lookup.
#[derive(Debug, Clone, Default)]
pub struct PlannerOptions {
    /// Restrict statuses to these courses; `None` means all of the user's.
    pub course_ids: Option<Vec<DbId>>,
}

/// Produces the submission status index for a user. Called at most once
/// per serialized batch.
pub trait SubmissionStatusSource {
    fn submission_statuses(
        &self,
        user_id: DbId,
        opts: &PlannerOptions,
    ) -> Cow<'_, SubmissionStatusIndex>;
}

/// A prefetched index was already scoped by whoever loaded it, so it is
/// lent out as-is.
impl SubmissionStatusSource for SubmissionStatusIndex {
    fn submission_statuses(
        &self,
        _user_id: DbId,
        _opts: &PlannerOptions,
    ) -> Cow<'_, SubmissionStatusIndex> {
        Cow::Borrowed(self)
    }
}

/// Finds a user's planner override for a record.
pub trait PlannerOverrideSource {
    fn planner_override_for(&self, key: PlannableKey, user_id: DbId) -> Option<PlannerOverride>;
}

/// Overrides of a single user, keyed by record class name and id.
///
/// Rows are indexed by their stored class name as-is. A row naming a class
/// that is not plannable is never looked up, so it cannot affect the feed.
#[derive(Debug, Clone, Default)]
pub struct OverrideIndex {
    user_id: DbId,
    by_class: HashMap<String, HashMap<DbId, PlannerOverride>>,
}

impl OverrideIndex {
    pub fn new(user_id: DbId, overrides: impl IntoIterator<Item = PlannerOverride>) -> Self {
        let mut by_class: HashMap<String, HashMap<DbId, PlannerOverride>> = HashMap::new();
        for o in overrides {
            by_class
                .entry(o.plannable_type.clone())
                .or_default()
                .insert(o.plannable_id, o);
        }
        Self { user_id, by_class }
    }
}

impl PlannerOverrideSource for OverrideIndex {
    fn planner_override_for(&self, key: PlannableKey, user_id: DbId) -> Option<PlannerOverride> {
        if user_id != self.user_id {
            return None;
        }
        self.by_class
            .get(key.record_type.class_name())
            .and_then(|by_id| by_id.get(&key.id))
            .cloned()
    }
}

/// Builds links to plannable items.
#[derive(Debug, Clone)]
pub struct PlannerUrls {
    base_url: String,
}

impl PlannerUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn context_url(&self, context: ContextRef, rest: &str) -> String {
        let segment = match context {
            ContextRef::Course(_) => "courses",
            ContextRef::Group(_) => "groups",
            ContextRef::User(_) => "users",
        };
        format!("{}/{segment}/{}/{rest}", self.base_url, context.id())
    }

    pub fn assignment_url(&self, assignment: &Assignment) -> String {
        self.context_url(assignment.context, &format!("assignments/{}", assignment.id))
    }

    pub fn quiz_url(&self, quiz: &Quiz) -> String {
        self.context_url(quiz.context, &format!("quizzes/{}", quiz.id))
    }

    pub fn wiki_page_url(&self, page: &WikiPage) -> String {
        self.context_url(page.context, &format!("pages/{}", page.url))
    }

    pub fn discussion_topic_url(&self, topic: &DiscussionTopic) -> String {
        self.context_url(topic.context, &format!("discussion_topics/{}", topic.id))
    }

    /// Planner notes link to their API path rather than a page.
    pub fn planner_note_path(&self, note: &PlannerNote) -> String {
        format!("/api/v1/planner_notes/{}", note.id)
    }
}

// ---------------------------------------------------------------------------
// Output shapes
// ---------------------------------------------------------------------------

/// Context keys flattened into every planner item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextData {
    pub context_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<DbId>,
}

impl From<ContextRef> for ContextData {
    fn from(context: ContextRef) -> Self {
        let (course_id, group_id, user_id) = match context {
            ContextRef::Course(id) => (Some(id), None, None),
            ContextRef::Group(id) => (None, Some(id), None),
            ContextRef::User(id) => (None, None, Some(id)),
        };
        Self {
            context_type: context.context_type(),
            course_id,
            group_id,
            user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerOverrideJson {
    pub id: DbId,
    pub plannable_type: PlannableType,
    pub plannable_id: DbId,
    pub user_id: DbId,
    pub visible: bool,
    pub marked_complete: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<PlannerOverride> for PlannerOverrideJson {
    type Error = CoreError;

    /// A stored class name outside the plannable set is bad server data,
    /// not a client mistake.
    fn try_from(o: PlannerOverride) -> Result<Self, Self::Error> {
        let plannable_type = RecordType::from_class_name(&o.plannable_type)
            .map_err(|_| {
                CoreError::Internal(format!(
                    "planner override {} has unknown plannable type '{}'",
                    o.id, o.plannable_type
                ))
            })?
            .public_type();
        Ok(Self {
            id: o.id,
            plannable_type,
            plannable_id: o.plannable_id,
            user_id: o.user_id,
            visible: o.visible,
            marked_complete: o.marked_complete,
            created_at: o.created_at,
            updated_at: o.updated_at,
        })
    }
}

/// Submission summary: the seven flags for assignments, literal `false`
/// for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submissions {
    NotApplicable,
    Statuses(SubmissionFlags),
}

impl Serialize for Submissions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NotApplicable => serializer.serialize_bool(false),
            Self::Statuses(flags) => flags.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentJson {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub due_at: Option<Timestamp>,
    pub points_possible: Option<f64>,
    pub submission_types: Vec<String>,
    pub published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussion_topic: Option<DiscussionTopicJson>,
}

impl From<&Assignment> for AssignmentJson {
    fn from(a: &Assignment) -> Self {
        Self {
            id: a.id,
            name: a.title.clone(),
            description: a.description.clone(),
            due_at: a.due_at,
            points_possible: a.points_possible,
            submission_types: a.submission_types.clone(),
            published: a.workflow_state == "published",
            discussion_topic: a.discussion_topic.as_ref().map(DiscussionTopicJson::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizJson {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub quiz_type: String,
    pub due_at: Option<Timestamp>,
    pub points_possible: Option<f64>,
    pub assignment_id: Option<DbId>,
    pub published: bool,
}

impl From<&Quiz> for QuizJson {
    fn from(q: &Quiz) -> Self {
        Self {
            id: q.id,
            title: q.title.clone(),
            description: q.description.clone(),
            quiz_type: q.quiz_type.clone(),
            due_at: q.due_at,
            points_possible: q.points_possible,
            assignment_id: q.assignment_id,
            published: q.workflow_state == "available",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscussionTopicJson {
    pub id: DbId,
    pub title: String,
    pub message: Option<String>,
    pub todo_date: Option<Timestamp>,
    pub posted_at: Option<Timestamp>,
    pub assignment_id: Option<DbId>,
    pub is_announcement: bool,
    pub published: bool,
}

impl From<&DiscussionTopic> for DiscussionTopicJson {
    fn from(t: &DiscussionTopic) -> Self {
        Self {
            id: t.id,
            title: t.title.clone(),
            message: t.message.clone(),
            todo_date: t.todo_date,
            posted_at: t.posted_at,
            assignment_id: t.assignment_id,
            is_announcement: t.is_announcement,
            published: t.workflow_state == "active",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WikiPageJson {
    pub page_id: DbId,
    pub url: String,
    pub title: String,
    pub body: Option<String>,
    pub todo_date: Option<Timestamp>,
    pub published: bool,
}

impl From<&WikiPage> for WikiPageJson {
    fn from(p: &WikiPage) -> Self {
        Self {
            page_id: p.id,
            url: p.url.clone(),
            title: p.title.clone(),
            body: p.body.clone(),
            todo_date: p.todo_date,
            published: p.workflow_state == "active",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerNoteJson {
    pub id: DbId,
    pub title: String,
    pub details: Option<String>,
    pub todo_date: Option<Timestamp>,
    pub user_id: DbId,
    pub course_id: Option<DbId>,
    pub workflow_state: String,
}

impl From<&PlannerNote> for PlannerNoteJson {
    fn from(n: &PlannerNote) -> Self {
        Self {
            id: n.id,
            title: n.title.clone(),
            details: n.details.clone(),
            todo_date: n.todo_date,
            user_id: n.user_id,
            course_id: n.course_id,
            workflow_state: n.workflow_state.clone(),
        }
    }
}

/// The type-specific representation embedded as `plannable`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlannableJson {
    Assignment(AssignmentJson),
    Quiz(QuizJson),
    DiscussionTopic(DiscussionTopicJson),
    WikiPage(WikiPageJson),
    PlannerNote(PlannerNoteJson),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannerItemJson {
    #[serde(flatten)]
    pub context: ContextData,
    pub plannable_id: DbId,
    pub plannable_date: Option<Timestamp>,
    pub visible_in_planner: bool,
    pub planner_override: Option<PlannerOverrideJson>,
    pub submissions: Submissions,
    pub plannable_type: PlannableType,
    pub plannable: PlannableJson,
    pub html_url: String,
}

// ---------------------------------------------------------------------------
// Serializer
// ---------------------------------------------------------------------------

/// Serializes planner items for one user.
///
/// The submission status index is requested from its source lazily, on the
/// first assignment, and reused for the rest of the batch.
pub struct PlannerSerializer<'a> {
    user_id: DbId,
    statuses: &'a dyn SubmissionStatusSource,
    overrides: &'a dyn PlannerOverrideSource,
    urls: &'a PlannerUrls,
    opts: PlannerOptions,
    status_index: OnceCell<Cow<'a, SubmissionStatusIndex>>,
}

impl<'a> PlannerSerializer<'a> {
    pub fn new(
        user_id: DbId,
        statuses: &'a dyn SubmissionStatusSource,
        overrides: &'a dyn PlannerOverrideSource,
        urls: &'a PlannerUrls,
        opts: PlannerOptions,
    ) -> Self {
        Self {
            user_id,
            statuses,
            overrides,
            urls,
            opts,
            status_index: OnceCell::new(),
        }
    }

    /// Serialize `items` in order, one output per input.
    pub fn planner_items_json(&self, items: &[PlannableItem]) -> Result<Vec<PlannerItemJson>, CoreError> {
        items.iter().map(|item| self.planner_item_json(item)).collect()
    }

    pub fn planner_item_json(&self, item: &PlannableItem) -> Result<PlannerItemJson, CoreError> {
        let own_override = self
            .overrides
            .planner_override_for(item.record_key(), self.user_id);
        let visible_in_planner = own_override.as_ref().map_or(true, |o| o.visible);
        let mut planner_override = own_override
            .map(PlannerOverrideJson::try_from)
            .transpose()?;

        let submissions = self.submission_statuses_for(item);

        let (plannable_type, plannable, html_url, resolved_key) = match item.resolve() {
            Resolved::PlannerNote(note) => (
                PlannableType::PlannerNote,
                PlannableJson::PlannerNote(note.into()),
                self.urls.planner_note_path(note),
                None,
            ),
            Resolved::Quiz(quiz) => (
                PlannableType::Quiz,
                PlannableJson::Quiz(quiz.into()),
                self.urls.quiz_url(quiz),
                Some(PlannableKey::new(RecordType::Quiz, quiz.id)),
            ),
            Resolved::WikiPage(page) => (
                PlannableType::WikiPage,
                PlannableJson::WikiPage(page.into()),
                self.urls.wiki_page_url(page),
                Some(PlannableKey::new(RecordType::WikiPage, page.id)),
            ),
            Resolved::Announcement(announcement) => (
                PlannableType::Announcement,
                PlannableJson::DiscussionTopic((&announcement.topic).into()),
                self.urls.discussion_topic_url(&announcement.topic),
                None,
            ),
            Resolved::DiscussionTopic(topic) => (
                PlannableType::DiscussionTopic,
                PlannableJson::DiscussionTopic(topic.into()),
                self.urls.discussion_topic_url(topic),
                Some(PlannableKey::new(RecordType::DiscussionTopic, topic.id)),
            ),
            Resolved::Assignment(assignment) => (
                PlannableType::Assignment,
                PlannableJson::Assignment(assignment.into()),
                self.urls.assignment_url(assignment),
                None,
            ),
        };

        if planner_override.is_none() {
            if let Some(key) = resolved_key {
                planner_override = self
                    .overrides
                    .planner_override_for(key, self.user_id)
                    .map(PlannerOverrideJson::try_from)
                    .transpose()?;
            }
        }

        Ok(PlannerItemJson {
            context: item.context().into(),
            plannable_id: item.id(),
            plannable_date: item.planner_date(),
            visible_in_planner,
            planner_override,
            submissions,
            plannable_type,
            plannable,
            html_url,
        })
    }

    fn submission_statuses_for(&self, item: &PlannableItem) -> Submissions {
        let PlannableItem::Assignment(assignment) = item else {
            return Submissions::NotApplicable;
        };
        let index = self
            .status_index
            .get_or_init(|| self.statuses.submission_statuses(self.user_id, &self.opts));
        Submissions::Statuses(index.flags_for(assignment.id))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::plannable::Announcement;
    use crate::submission_status::SubmissionStatusRow;

    const USER: DbId = 42;
    const COURSE: ContextRef = ContextRef::Course(7);

    fn at(day: u32) -> Option<Timestamp> {
        Some(Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap())
    }

    fn assignment(id: DbId) -> Assignment {
        Assignment {
            id,
            context: COURSE,
            title: format!("Assignment {id}"),
            description: None,
            due_at: at(1),
            points_possible: Some(10.0),
            submission_types: vec!["online_upload".into()],
            workflow_state: "published".into(),
            quiz: None,
            discussion_topic: None,
            wiki_page: None,
        }
    }

    fn quiz(id: DbId) -> Quiz {
        Quiz {
            id,
            context: COURSE,
            title: "Quiz".into(),
            description: None,
            quiz_type: "practice_quiz".into(),
            due_at: at(2),
            points_possible: None,
            assignment_id: None,
            workflow_state: "available".into(),
        }
    }

    fn topic(id: DbId, is_announcement: bool) -> DiscussionTopic {
        DiscussionTopic {
            id,
            context: COURSE,
            title: "Topic".into(),
            message: Some("<p>hi</p>".into()),
            todo_date: at(3),
            posted_at: at(1),
            assignment_id: None,
            is_announcement,
            workflow_state: "active".into(),
        }
    }

    fn page(id: DbId) -> WikiPage {
        WikiPage {
            id,
            context: COURSE,
            title: "Syllabus".into(),
            url: "syllabus".into(),
            body: None,
            todo_date: at(4),
            workflow_state: "active".into(),
        }
    }

    fn note(id: DbId) -> PlannerNote {
        PlannerNote {
            id,
            user_id: USER,
            course_id: None,
            title: "Read chapter 3".into(),
            details: None,
            todo_date: at(5),
            workflow_state: "active".into(),
        }
    }

    fn planner_override(class_name: &str, plannable_id: DbId, visible: bool) -> PlannerOverride {
        PlannerOverride {
            id: plannable_id * 100,
            plannable_type: class_name.into(),
            plannable_id,
            user_id: USER,
            visible,
            marked_complete: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Counts how often the status index is requested.
    #[derive(Default)]
    struct CountingStatuses {
        calls: Cell<usize>,
        rows: Vec<SubmissionStatusRow>,
    }

    impl SubmissionStatusSource for CountingStatuses {
        fn submission_statuses(
            &self,
            user_id: DbId,
            _opts: &PlannerOptions,
        ) -> Cow<'_, SubmissionStatusIndex> {
            assert_eq!(user_id, USER);
            self.calls.set(self.calls.get() + 1);
            Cow::Owned(SubmissionStatusIndex::from_rows(self.rows.clone()))
        }
    }

    fn urls() -> PlannerUrls {
        PlannerUrls::new("https://lms.example.com/")
    }

    #[test]
    fn test_each_variant_gets_its_tag_url_and_submissions() {
        let items = vec![
            PlannableItem::PlannerNote(note(1)),
            PlannableItem::Quiz(quiz(2)),
            PlannableItem::WikiPage(page(3)),
            PlannableItem::Announcement(Announcement { topic: topic(4, true) }),
            PlannableItem::DiscussionTopic(topic(5, false)),
            PlannableItem::Assignment(assignment(6)),
        ];
        let statuses = CountingStatuses::default();
        let overrides = OverrideIndex::default();
        let urls = urls();
        let serializer =
            PlannerSerializer::new(USER, &statuses, &overrides, &urls, PlannerOptions::default());

        let out = serializer.planner_items_json(&items).unwrap();

        let tags: Vec<_> = out.iter().map(|i| i.plannable_type.as_str()).collect();
        assert_eq!(
            tags,
            ["planner_note", "quiz", "wiki_page", "announcement", "discussion_topic", "assignment"]
        );
        for item in &out {
            assert!(!item.html_url.is_empty());
            if item.plannable_type == PlannableType::Assignment {
                assert_matches!(item.submissions, Submissions::Statuses(_));
            } else {
                assert_eq!(item.submissions, Submissions::NotApplicable);
            }
        }
        assert_eq!(out[0].html_url, "/api/v1/planner_notes/1");
        assert_eq!(out[1].html_url, "https://lms.example.com/courses/7/quizzes/2");
        assert_eq!(out[2].html_url, "https://lms.example.com/courses/7/pages/syllabus");
        assert_eq!(out[3].html_url, "https://lms.example.com/courses/7/discussion_topics/4");
        assert_eq!(out[5].html_url, "https://lms.example.com/courses/7/assignments/6");
    }

    #[test]
    fn test_batch_preserves_order_with_one_status_lookup() {
        let items: Vec<_> = (1..=25)
            .rev()
            .map(|id| PlannableItem::Assignment(assignment(id)))
            .collect();
        let statuses = CountingStatuses {
            rows: vec![SubmissionStatusRow {
                assignment_id: 3,
                workflow_state: "graded".into(),
                submitted_at: Some(Utc::now()),
                excused: false,
                late: true,
                missing: false,
                comment_count: 1,
            }],
            ..Default::default()
        };
        let overrides = OverrideIndex::default();
        let urls = urls();
        let serializer =
            PlannerSerializer::new(USER, &statuses, &overrides, &urls, PlannerOptions::default());

        let out = serializer.planner_items_json(&items).unwrap();

        assert_eq!(statuses.calls.get(), 1);
        let ids: Vec<_> = out.iter().map(|i| i.plannable_id).collect();
        assert_eq!(ids, (1..=25).rev().collect::<Vec<_>>());

        let third = out.iter().find(|i| i.plannable_id == 3).unwrap();
        assert_matches!(
            third.submissions,
            Submissions::Statuses(SubmissionFlags { graded: true, late: true, has_feedback: true, .. })
        );
    }

    #[test]
    fn test_no_status_lookup_without_assignments() {
        let statuses = CountingStatuses::default();
        let overrides = OverrideIndex::default();
        let urls = urls();
        let serializer =
            PlannerSerializer::new(USER, &statuses, &overrides, &urls, PlannerOptions::default());

        serializer
            .planner_items_json(&[PlannableItem::PlannerNote(note(1))])
            .unwrap();
        assert_eq!(statuses.calls.get(), 0);
    }

    #[test]
    fn test_quiz_shell_uses_assignment_identity_and_quiz_override() {
        let mut shell = assignment(10);
        shell.submission_types = vec!["online_quiz".into()];
        shell.quiz = Some(Quiz {
            assignment_id: Some(10),
            ..quiz(20)
        });
        let statuses = CountingStatuses::default();
        let overrides =
            OverrideIndex::new(USER, [planner_override("Quizzes::Quiz", 20, true)]);
        let urls = urls();
        let serializer =
            PlannerSerializer::new(USER, &statuses, &overrides, &urls, PlannerOptions::default());

        let out = serializer
            .planner_item_json(&PlannableItem::Assignment(shell))
            .unwrap();

        assert_eq!(out.plannable_type, PlannableType::Quiz);
        assert_eq!(out.plannable_id, 10);
        assert_eq!(out.html_url, "https://lms.example.com/courses/7/quizzes/20");
        assert_matches!(out.submissions, Submissions::Statuses(_));
        let o = out.planner_override.unwrap();
        assert_eq!(o.plannable_type, PlannableType::Quiz);
        assert_eq!(o.plannable_id, 20);
    }

    #[test]
    fn test_own_override_wins_and_controls_visibility() {
        let mut shell = assignment(10);
        shell.submission_types = vec!["discussion_topic".into()];
        shell.discussion_topic = Some(topic(30, false));
        let statuses = CountingStatuses::default();
        let overrides = OverrideIndex::new(
            USER,
            [
                planner_override("Assignment", 10, false),
                planner_override("DiscussionTopic", 30, true),
            ],
        );
        let urls = urls();
        let serializer =
            PlannerSerializer::new(USER, &statuses, &overrides, &urls, PlannerOptions::default());

        let out = serializer
            .planner_item_json(&PlannableItem::Assignment(shell))
            .unwrap();

        assert_eq!(out.plannable_type, PlannableType::DiscussionTopic);
        assert!(!out.visible_in_planner);
        let o = out.planner_override.unwrap();
        assert_eq!(o.plannable_type, PlannableType::Assignment);
        assert_eq!(o.plannable_id, 10);
    }

    #[test]
    fn test_plain_assignment_embeds_attached_topic() {
        let mut a = assignment(11);
        a.discussion_topic = Some(topic(31, false));
        let statuses = CountingStatuses::default();
        let overrides = OverrideIndex::default();
        let urls = urls();
        let serializer =
            PlannerSerializer::new(USER, &statuses, &overrides, &urls, PlannerOptions::default());

        let out = serializer.planner_item_json(&PlannableItem::Assignment(a)).unwrap();
        assert_eq!(out.plannable_type, PlannableType::Assignment);
        assert_matches!(
            out.plannable,
            PlannableJson::Assignment(AssignmentJson { discussion_topic: Some(_), .. })
        );
    }

    #[test]
    fn test_unrelated_unknown_override_does_not_break_batch() {
        let statuses = CountingStatuses::default();
        let overrides = OverrideIndex::new(
            USER,
            [
                planner_override("Assignment", 5, true),
                planner_override("CalendarEvent", 999, false),
            ],
        );
        let urls = urls();
        let serializer =
            PlannerSerializer::new(USER, &statuses, &overrides, &urls, PlannerOptions::default());

        let out = serializer
            .planner_items_json(&[PlannableItem::Assignment(assignment(5))])
            .unwrap();

        assert_eq!(out.len(), 1);
        assert!(out[0].visible_in_planner);
        assert_eq!(out[0].planner_override.as_ref().unwrap().plannable_id, 5);
    }

    #[test]
    fn test_prefetched_index_is_lent_not_copied() {
        let index = SubmissionStatusIndex::from_rows([SubmissionStatusRow {
            assignment_id: 6,
            workflow_state: "graded".into(),
            submitted_at: at(1),
            excused: false,
            late: false,
            missing: false,
            comment_count: 0,
        }]);

        let lent = index.submission_statuses(USER, &PlannerOptions::default());
        assert_matches!(lent, Cow::Borrowed(_));
        assert!(lent.flags_for(6).graded);
    }

    #[test]
    fn test_unknown_override_record_type_is_internal() {
        assert_matches!(
            PlannerOverrideJson::try_from(planner_override("CalendarEvent", 1, true)),
            Err(CoreError::Internal(_))
        );
    }

    #[test]
    fn test_json_shape() {
        let statuses = SubmissionStatusIndex::default();
        let overrides = OverrideIndex::default();
        let urls = urls();
        let serializer =
            PlannerSerializer::new(USER, &statuses, &overrides, &urls, PlannerOptions::default());

        let out = serializer
            .planner_items_json(&[
                PlannableItem::WikiPage(page(3)),
                PlannableItem::Assignment(assignment(6)),
            ])
            .unwrap();
        let json = serde_json::to_value(&out).unwrap();

        assert_eq!(json[0]["context_type"], "Course");
        assert_eq!(json[0]["course_id"], 7);
        assert_eq!(json[0]["submissions"], json!(false));
        assert_eq!(json[0]["plannable_type"], "wiki_page");
        assert_eq!(json[0]["plannable"]["url"], "syllabus");
        assert!(json[0]["planner_override"].is_null());
        assert_eq!(json[0]["visible_in_planner"], true);
        assert_eq!(
            json[1]["submissions"],
            json!({
                "submitted": false, "excused": false, "graded": false, "late": false,
                "missing": false, "needs_grading": false, "has_feedback": false
            })
        );
        assert_eq!(json[1]["plannable"]["name"], "Assignment 6");
    }
}
