//! Domain types for the todo board.
//!
//! A todo is an identified record with content fields, a workflow status, a
//! priority and a creation time. Status and priority are closed enumerations;
//! their wire names (`in-progress`, `high`, ...) are what filters and
//! serialized views use.

use crate::error::BoardError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque unique identifier for a todo
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Wraps an identifier string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TodoId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Workflow status of a todo
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Not started
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Done
    Completed,
}

impl Status {
    /// Every status, in display order
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Wire name (`pending`, `in-progress`, `completed`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Human label: capitalised, dash replaced by a space
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| BoardError::UnknownStatus(s.to_string()))
    }
}

/// Priority of a todo
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    /// Can wait
    Low,
    /// Normal
    #[default]
    Medium,
    /// Urgent
    High,
}

impl Priority {
    /// Every priority, in display order
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Wire name (`low`, `medium`, `high`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Upper-cased name used in tables
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|priority| priority.as_str() == s)
            .ok_or_else(|| BoardError::UnknownPriority(s.to_string()))
    }
}

/// Status dropdown value: `all` or one status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StatusFilter {
    /// No status restriction
    #[default]
    All,
    /// Only todos with this status
    Only(Status),
}

impl StatusFilter {
    /// Whether a todo with `status` passes this filter
    #[must_use]
    pub fn allows(self, status: Status) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl TryFrom<String> for StatusFilter {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StatusFilter> for String {
    fn from(filter: StatusFilter) -> Self {
        filter.to_string()
    }
}

/// Priority dropdown value: `all` or one priority
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PriorityFilter {
    /// No priority restriction
    #[default]
    All,
    /// Only todos with this priority
    Only(Priority),
}

impl PriorityFilter {
    /// Whether a todo with `priority` passes this filter
    #[must_use]
    pub fn allows(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == priority,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(priority) => priority.fmt(f),
        }
    }
}

impl FromStr for PriorityFilter {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl TryFrom<String> for PriorityFilter {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PriorityFilter> for String {
    fn from(filter: PriorityFilter) -> Self {
        filter.to_string()
    }
}

/// The user-editable fields of a todo
///
/// `Default` is the blank create-mode draft: empty text, pending, medium.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoDraft {
    /// Required; must be non-blank once trimmed
    pub title: String,
    /// Free text, may be empty
    pub description: String,
    /// Workflow status
    pub status: Status,
    /// Priority
    pub priority: Priority,
}

impl TodoDraft {
    /// Draft with a title and defaults for everything else
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the status
    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Whether the title is blank after trimming
    #[must_use]
    pub fn has_blank_title(&self) -> bool {
        self.title.trim().is_empty()
    }
}

impl From<&Todo> for TodoDraft {
    fn from(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            status: todo.status,
            priority: todo.priority,
        }
    }
}

/// A single todo
///
/// Fields are readable anywhere, but todos are only minted by
/// [`TodoCollection::add`](crate::collection::TodoCollection::add), which
/// assigns the id and creation time:
///
/// ```compile_fail
/// use taskdeck_board::{Todo, TodoDraft, TodoId};
///
/// let forged = Todo::new(TodoId::new("x"), TodoDraft::titled("x"), chrono::Utc::now());
/// ```
///
/// ```compile_fail
/// use taskdeck_board::{Priority, Status, Todo, TodoId};
///
/// let forged = Todo {
///     id: TodoId::new("x"),
///     title: "x".to_string(),
///     description: String::new(),
///     status: Status::Pending,
///     priority: Priority::Medium,
///     created_at: chrono::Utc::now(),
/// };
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct Todo {
    /// Unique identifier, fixed at creation
    pub id: TodoId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Workflow status
    pub status: Status,
    /// Priority
    pub priority: Priority,
    /// When the todo was created; never changes
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Builds a todo from a draft
    #[must_use]
    pub(crate) fn new(id: TodoId, draft: TodoDraft, created_at: DateTime<Utc>) -> Self {
        let TodoDraft {
            title,
            description,
            status,
            priority,
        } = draft;
        Self {
            id,
            title,
            description,
            status,
            priority,
            created_at,
        }
    }

    /// Overwrites the editable fields, keeping id and creation time
    pub fn apply(&mut self, draft: TodoDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.status = draft.status;
        self.priority = draft.priority;
    }
}

/// Aggregate counts over the whole (unfiltered) collection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of todos
    pub total: usize,
    /// Todos with status `completed`
    pub completed: usize,
    /// Todos with status `in-progress`
    pub in_progress: usize,
    /// Todos with status `pending`
    pub pending: usize,
}

impl Stats {
    /// Counts statuses over `todos`
    #[must_use]
    pub fn from_todos(todos: &[Todo]) -> Self {
        todos.iter().fold(
            Self {
                total: todos.len(),
                ..Self::default()
            },
            |mut stats, todo| {
                match todo.status {
                    Status::Pending => stats.pending += 1,
                    Status::InProgress => stats.in_progress += 1,
                    Status::Completed => stats.completed += 1,
                }
                stats
            },
        )
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn status_wire_names_round_trip_through_from_str() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
        assert_eq!(
            "done".parse::<Status>(),
            Err(BoardError::UnknownStatus("done".to_string()))
        );
    }

    #[test]
    fn status_serializes_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
    }

    #[test]
    fn labels() {
        assert_eq!(Status::InProgress.label(), "In progress");
        assert_eq!(Status::Pending.label(), "Pending");
        assert_eq!(Priority::Low.label(), "LOW");
    }

    #[test]
    fn filters_parse_all_and_single_values() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "completed".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(Status::Completed)
        );
        assert_eq!(
            "medium".parse::<PriorityFilter>().unwrap(),
            PriorityFilter::Only(Priority::Medium)
        );
        assert!("urgent".parse::<PriorityFilter>().is_err());
    }

    #[test]
    fn filters_serialize_as_plain_strings() {
        let json = serde_json::to_string(&StatusFilter::Only(Status::InProgress)).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let back: PriorityFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(back, PriorityFilter::All);
    }

    #[test]
    fn filter_allows() {
        assert!(StatusFilter::All.allows(Status::Pending));
        assert!(StatusFilter::Only(Status::Completed).allows(Status::Completed));
        assert!(!StatusFilter::Only(Status::Completed).allows(Status::Pending));
        assert!(!PriorityFilter::Only(Priority::Low).allows(Priority::High));
    }

    #[test]
    fn default_draft_is_blank_pending_medium() {
        let draft = TodoDraft::default();
        assert!(draft.has_blank_title());
        assert_eq!(draft.status, Status::Pending);
        assert_eq!(draft.priority, Priority::Medium);
    }

    #[test]
    fn apply_keeps_identity_and_creation_time() {
        let created = Utc::now();
        let mut todo = Todo::new(TodoId::new("1"), TodoDraft::titled("Old"), created);
        todo.apply(
            TodoDraft::titled("New")
                .with_description("details")
                .with_status(Status::Completed)
                .with_priority(Priority::Low),
        );
        assert_eq!(todo.id, TodoId::new("1"));
        assert_eq!(todo.created_at, created);
        assert_eq!(todo.title, "New");
        assert_eq!(todo.status, Status::Completed);
    }

    #[test]
    fn stats_count_each_status() {
        let now = Utc::now();
        let todos = vec![
            Todo::new("a".into(), TodoDraft::titled("a"), now),
            Todo::new("b".into(), TodoDraft::titled("b").with_status(Status::Completed), now),
            Todo::new("c".into(), TodoDraft::titled("c").with_status(Status::InProgress), now),
            Todo::new("d".into(), TodoDraft::titled("d").with_status(Status::Completed), now),
        ];
        assert_eq!(
            Stats::from_todos(&todos),
            Stats {
                total: 4,
                completed: 2,
                in_progress: 1,
                pending: 1,
            }
        );
    }
}
