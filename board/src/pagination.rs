//! Pagination controller.
//!
//! Page numbers are 1-based. The current page is only clamped when a caller
//! navigates; a shrinking result set can leave it past the last page, in
//! which case the window is empty until the user moves.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::ops::RangeInclusive;

/// Page size used when none is configured
pub const DEFAULT_ITEMS_PER_PAGE: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// "Showing X to Y of Z" figures for the current page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSummary {
    /// 1-based position of the first item on the page
    pub first: usize,
    /// 1-based position of the last item on the page, capped at `total`
    pub last: usize,
    /// Filtered item count
    pub total: usize,
}

/// Current page and fixed page size
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    current_page: NonZeroUsize,
    items_per_page: NonZeroUsize,
}

impl Pagination {
    /// Page 1 with the given page size
    #[must_use]
    pub const fn new(items_per_page: NonZeroUsize) -> Self {
        Self {
            current_page: NonZeroUsize::MIN,
            items_per_page,
        }
    }

    /// The current 1-based page
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page.get()
    }

    /// Items per page
    #[must_use]
    pub const fn items_per_page(&self) -> usize {
        self.items_per_page.get()
    }

    /// `ceil(count / per_page)`, but never less than 1
    #[must_use]
    pub const fn total_pages(&self, filtered_count: usize) -> usize {
        if filtered_count == 0 {
            1
        } else {
            filtered_count.div_ceil(self.items_per_page.get())
        }
    }

    /// Index of the first item on the current page
    #[must_use]
    pub const fn start_index(&self) -> usize {
        (self.current_page.get() - 1).saturating_mul(self.items_per_page.get())
    }

    /// The slice of `items` shown on the current page
    ///
    /// Empty when the current page lies past the end of `items`.
    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start_index().min(items.len());
        let end = start.saturating_add(self.items_per_page.get()).min(items.len());
        &items[start..end]
    }

    /// Moves to page `page`, clamped to `[1, total_pages]`
    ///
    /// Returns the page actually selected.
    pub fn go_to_page(&mut self, page: usize, filtered_count: usize) -> usize {
        let page = page.clamp(1, self.total_pages(filtered_count));
        self.current_page = NonZeroUsize::new(page).unwrap_or(NonZeroUsize::MIN);
        self.current_page.get()
    }

    /// Back to page 1
    pub const fn reset(&mut self) {
        self.current_page = NonZeroUsize::MIN;
    }

    /// Whether the previous-page control is enabled
    #[must_use]
    pub const fn can_go_previous(&self) -> bool {
        self.current_page.get() > 1
    }

    /// Whether the next-page control is enabled
    ///
    /// Only the exact last page disables it. A stale page past the end keeps
    /// it enabled; pressing it clamps back to the last page.
    #[must_use]
    pub const fn can_go_next(&self, filtered_count: usize) -> bool {
        filtered_count > 0 && self.current_page.get() != self.total_pages(filtered_count)
    }

    /// Page buttons to render; none when nothing matches
    #[must_use]
    pub const fn page_numbers(&self, filtered_count: usize) -> RangeInclusive<usize> {
        let last = if filtered_count == 0 {
            0
        } else {
            self.total_pages(filtered_count)
        };
        1..=last
    }

    /// The "Showing X to Y of Z" line, suppressed when nothing matches
    #[must_use]
    pub fn summary(&self, filtered_count: usize) -> Option<PageSummary> {
        (filtered_count > 0).then(|| PageSummary {
            first: self.start_index() + 1,
            last: self
                .current_page
                .get()
                .saturating_mul(self.items_per_page.get())
                .min(filtered_count),
            total: filtered_count,
        })
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}
