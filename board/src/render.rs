//! Plain-text presentation of a [`BoardView`].
//!
//! Rendering only reads the view. It never filters or pages on its own.

use crate::pagination::PageSummary;
use crate::types::Todo;
use crate::view::BoardView;
use std::fmt;

/// Longest description shown before truncation
const DESCRIPTION_WIDTH: usize = 40;

/// Shown in place of rows when the page is empty
pub const EMPTY_PAGE_MESSAGE: &str = "No todos found. Create one to get started!";

/// Displays a view as a text table
///
/// ```ignore
/// println!("{}", TextView(&state.view()));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextView<'a>(pub &'a BoardView);

impl fmt::Display for TextView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let view = self.0;
        let stats = view.stats;
        writeln!(
            f,
            "Total {} | Completed {} | In progress {} | Pending {}",
            stats.total, stats.completed, stats.in_progress, stats.pending
        )?;
        writeln!(
            f,
            "Search {:?} | Status {} | Priority {}",
            view.filter.search, view.filter.status, view.filter.priority
        )?;

        let title_width = view
            .page
            .iter()
            .map(|t| t.title.chars().count())
            .max()
            .unwrap_or(0)
            .max("Title".len());
        writeln!(
            f,
            "{:<title_width$}  {:<DESCRIPTION_WIDTH$}  {:<11}  {:<8}  Created",
            "Title", "Description", "Status", "Priority"
        )?;

        if view.page.is_empty() {
            writeln!(f, "{EMPTY_PAGE_MESSAGE}")?;
        }
        for todo in &view.page {
            write_row(f, todo, title_width)?;
        }

        if let Some(summary) = view.summary {
            writeln!(f, "{}", summary_line(summary))?;
            writeln!(f, "{}", page_bar(view))?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, todo: &Todo, title_width: usize) -> fmt::Result {
    writeln!(
        f,
        "{:<title_width$}  {:<DESCRIPTION_WIDTH$}  {:<11}  {:<8}  {}",
        todo.title,
        truncate(&todo.description, DESCRIPTION_WIDTH),
        todo.status.label(),
        todo.priority.label(),
        todo.created_at.format("%Y-%m-%d"),
    )
}

/// "Showing X to Y of Z todos"
#[must_use]
pub fn summary_line(summary: PageSummary) -> String {
    format!(
        "Showing {} to {} of {} todos",
        summary.first, summary.last, summary.total
    )
}

/// Page controls, e.g. `< [1] 2 3 >`; disabled arrows are shown as `-`
#[must_use]
pub fn page_bar(view: &BoardView) -> String {
    let previous = if view.can_go_previous { "<" } else { "-" };
    let next = if view.can_go_next { ">" } else { "-" };
    let buttons: Vec<String> = view
        .page_numbers
        .iter()
        .map(|&n| {
            if n == view.current_page {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();
    format!("{previous} {} {next}", buttons.join(" "))
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
