//! Derivation pipeline: everything a renderer sees, computed from raw state.
//!
//! Nothing here is cached. A [`BoardView`] is rebuilt from the collection,
//! filter, pagination and form on every read, so it cannot drift from them.

use crate::collection::TodoCollection;
use crate::filter::TodoFilter;
use crate::form::{FormSession, FormView};
use crate::pagination::{PageSummary, Pagination};
use crate::types::{Stats, Todo};
use serde::{Deserialize, Serialize};

/// Todos passing `filter`, in collection order
#[must_use]
pub fn filter_todos<'a>(todos: &'a [Todo], filter: &TodoFilter) -> Vec<&'a Todo> {
    todos.iter().filter(|todo| filter.matches(todo)).collect()
}

/// Owned snapshot handed to presentation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    /// Todos on the current page
    pub page: Vec<Todo>,
    /// Counts over the full, unfiltered collection
    pub stats: Stats,
    /// Current 1-based page (may exceed `total_pages` after deletes)
    pub current_page: usize,
    /// Page count for the filtered set, at least 1
    pub total_pages: usize,
    /// Size of the filtered set
    pub filtered_count: usize,
    /// Page size
    pub items_per_page: usize,
    /// Search and dropdown values in effect
    pub filter: TodoFilter,
    /// "Showing X to Y of Z", absent when nothing matches
    pub summary: Option<PageSummary>,
    /// Page buttons, empty when nothing matches
    pub page_numbers: Vec<usize>,
    /// Previous-page control enabled
    pub can_go_previous: bool,
    /// Next-page control enabled
    pub can_go_next: bool,
    /// Add/edit dialog
    pub form: FormView,
}

impl BoardView {
    /// Runs the pipeline over the given state
    #[must_use]
    pub fn derive(
        todos: &TodoCollection,
        filter: &TodoFilter,
        pagination: &Pagination,
        form: &FormSession,
    ) -> Self {
        let filtered = filter_todos(todos.as_slice(), filter);
        let filtered_count = filtered.len();

        Self {
            page: pagination
                .window(&filtered)
                .iter()
                .map(|todo| (*todo).clone())
                .collect(),
            stats: todos.stats(),
            current_page: pagination.current_page(),
            total_pages: pagination.total_pages(filtered_count),
            filtered_count,
            items_per_page: pagination.items_per_page(),
            filter: filter.clone(),
            summary: pagination.summary(filtered_count),
            page_numbers: pagination.page_numbers(filtered_count).collect(),
            can_go_previous: pagination.can_go_previous(),
            can_go_next: pagination.can_go_next(filtered_count),
            form: FormView::from(form),
        }
    }

    /// Whether the current page has no rows to show
    #[must_use]
    pub fn is_page_empty(&self) -> bool {
        self.page.is_empty()
    }
}
