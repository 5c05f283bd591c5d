//! Search and filter predicate.

use crate::types::{PriorityFilter, StatusFilter, Todo};
use serde::{Deserialize, Serialize};

/// Current search term plus the two dropdown filters
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoFilter {
    /// Case-insensitive substring matched against title or description
    pub search: String,
    /// Status dropdown
    pub status: StatusFilter,
    /// Priority dropdown
    pub priority: PriorityFilter,
}

impl TodoFilter {
    /// Whether `todo` passes search, status and priority together
    #[must_use]
    pub fn matches(&self, todo: &Todo) -> bool {
        matches(todo, &self.search, self.status, self.priority)
    }

    /// Whether every todo passes (nothing is being filtered)
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.status == StatusFilter::All && self.priority == PriorityFilter::All
    }
}

/// Inclusion test for a single todo
///
/// An empty `search` matches everything; otherwise the lower-cased term must
/// occur in the lower-cased title or description.
#[must_use]
pub fn matches(todo: &Todo, search: &str, status: StatusFilter, priority: PriorityFilter) -> bool {
    matches_search(todo, search) && status.allows(todo.status) && priority.allows(todo.priority)
}

fn matches_search(todo: &Todo, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    todo.title.to_lowercase().contains(&needle) || todo.description.to_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Priority, Status, TodoDraft};
    use chrono::Utc;

    fn todo(title: &str, description: &str, status: Status, priority: Priority) -> Todo {
        Todo::new(
            title.into(),
            TodoDraft::titled(title)
                .with_description(description)
                .with_status(status)
                .with_priority(priority),
            Utc::now(),
        )
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let schema = todo(
            "Design Database Schema",
            "Create database schema for the application",
            Status::Completed,
            Priority::High,
        );
        assert!(matches(&schema, "datab", StatusFilter::All, PriorityFilter::All));
        assert!(matches(&schema, "SCHEMA", StatusFilter::All, PriorityFilter::All));
        assert!(!matches(&schema, "next.js", StatusFilter::All, PriorityFilter::All));
    }

    #[test]
    fn search_checks_description_too() {
        let learn = todo(
            "Learn Next.js",
            "Complete Next.js tutorial and build a project",
            Status::InProgress,
            Priority::High,
        );
        assert!(matches(&learn, "tutorial", StatusFilter::All, PriorityFilter::All));
    }

    #[test]
    fn empty_search_with_all_filters_matches_everything() {
        for status in Status::ALL {
            for priority in Priority::ALL {
                let t = todo("x", "", status, priority);
                assert!(TodoFilter::default().matches(&t));
            }
        }
        assert!(TodoFilter::default().is_unfiltered());
    }

    #[test]
    fn all_three_conditions_must_hold() {
        let t = todo("Write docs", "", Status::Completed, Priority::Low);
        let filter = TodoFilter {
            search: "docs".to_string(),
            status: StatusFilter::Only(Status::Completed),
            priority: PriorityFilter::Only(Priority::High),
        };
        assert!(!filter.matches(&t));

        let filter = TodoFilter {
            priority: PriorityFilter::Only(Priority::Low),
            ..filter
        };
        assert!(filter.matches(&t));
        assert!(!filter.is_unfiltered());
    }

    #[test]
    fn status_filter_only_passes_that_status() {
        let done = todo("a", "", Status::Completed, Priority::Medium);
        let pending = todo("b", "", Status::Pending, Priority::Medium);
        let only_done = StatusFilter::Only(Status::Completed);
        assert!(matches(&done, "", only_done, PriorityFilter::All));
        assert!(!matches(&pending, "", only_done, PriorityFilter::All));
    }
}
