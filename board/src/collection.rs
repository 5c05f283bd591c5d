//! The ordered todo collection and its CRUD rules.
//!
//! Newest todos come first. Edits keep a todo where it is; nothing re-sorts.
//! Ids are unique and titles are non-blank for every stored todo.

use crate::error::BoardError;
use crate::types::{Priority, Stats, Status, Todo, TodoDraft, TodoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered collection of todos, most recent first
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoCollection {
    todos: Vec<Todo>,
}

impl TodoCollection {
    /// Creates an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self { todos: Vec::new() }
    }

    /// The two todos a fresh board starts with
    #[must_use]
    pub fn sample() -> Self {
        // 2025-01-15 and 2025-01-10, midnight UTC
        let at = |secs: i64| DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default();
        Self {
            todos: vec![
                Todo::new(
                    TodoId::new("1"),
                    TodoDraft::titled("Learn Next.js")
                        .with_description("Complete Next.js tutorial and build a project")
                        .with_status(Status::InProgress)
                        .with_priority(Priority::High),
                    at(1_736_899_200),
                ),
                Todo::new(
                    TodoId::new("2"),
                    TodoDraft::titled("Design Database Schema")
                        .with_description("Create database schema for the application")
                        .with_status(Status::Completed)
                        .with_priority(Priority::High),
                    at(1_736_467_200),
                ),
            ],
        }
    }

    /// Creates a todo from `draft` and prepends it
    ///
    /// # Errors
    ///
    /// - [`BoardError::EmptyTitle`] if the draft's title is blank
    /// - [`BoardError::DuplicateId`] if `id` is already present
    pub fn add(
        &mut self,
        draft: TodoDraft,
        id: TodoId,
        created_at: DateTime<Utc>,
    ) -> Result<&Todo, BoardError> {
        if draft.has_blank_title() {
            return Err(BoardError::EmptyTitle);
        }
        if self.contains(&id) {
            return Err(BoardError::DuplicateId(id.to_string()));
        }

        self.todos.insert(0, Todo::new(id, draft, created_at));
        Ok(&self.todos[0])
    }

    /// Replaces the editable fields of the todo with `id`, in place
    ///
    /// Returns `Ok(None)` when no such todo exists; that is a no-op, not a
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyTitle`] if the draft's title is blank.
    pub fn update(&mut self, id: &TodoId, draft: TodoDraft) -> Result<Option<&Todo>, BoardError> {
        if draft.has_blank_title() {
            return Err(BoardError::EmptyTitle);
        }

        Ok(self.todos.iter_mut().find(|t| &t.id == id).map(|todo| {
            todo.apply(draft);
            &*todo
        }))
    }

    /// Removes the todo with `id`, returning it; `None` if absent
    pub fn remove(&mut self, id: &TodoId) -> Option<Todo> {
        let index = self.todos.iter().position(|t| &t.id == id)?;
        Some(self.todos.remove(index))
    }

    /// Returns a todo by id
    #[must_use]
    pub fn get(&self, id: &TodoId) -> Option<&Todo> {
        self.todos.iter().find(|t| &t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn contains(&self, id: &TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.len()
    }

    /// Whether the collection holds no todos
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Iterates in display order (newest first)
    pub fn iter(&self) -> std::slice::Iter<'_, Todo> {
        self.todos.iter()
    }

    /// The todos as a slice, in display order
    #[must_use]
    pub fn as_slice(&self) -> &[Todo] {
        &self.todos
    }

    /// Status counts over the whole collection
    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::from_todos(&self.todos)
    }
}

impl<'a> IntoIterator for &'a TodoCollection {
    type Item = &'a Todo;
    type IntoIter = std::slice::Iter<'a, Todo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
