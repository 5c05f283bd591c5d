//! Reducer logic for the todo board.
//!
//! User intents come in as actions. The reducer applies them to the board
//! state and reports outcomes (`TodoCreated`, `SubmissionRejected`, ...) as
//! feedback actions so observers of the store see what happened.

use crate::collection::TodoCollection;
use crate::error::BoardError;
use crate::filter::TodoFilter;
use crate::form::{FormSession, Submission};
use crate::pagination::Pagination;
use crate::types::{Priority, PriorityFilter, Status, StatusFilter, Todo, TodoDraft, TodoId};
use crate::view::{BoardView, filter_todos};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::Arc;
use taskdeck_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator, SystemClock, UuidGenerator},
    reducer::Reducer,
    smallvec,
};

/// Environment dependencies for the board reducer
#[derive(Clone)]
pub struct BoardEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of todo ids
    pub ids: Arc<dyn IdGenerator>,
}

impl BoardEnvironment {
    /// Creates a new `BoardEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Wall clock and random UUIDs
    #[must_use]
    pub fn live() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidGenerator))
    }
}

impl std::fmt::Debug for BoardEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardEnvironment").finish_non_exhaustive()
    }
}

/// Everything the board owns for the lifetime of a session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    /// All todos, newest first
    pub todos: TodoCollection,
    /// Search term and dropdowns
    pub filter: TodoFilter,
    /// Current page and page size
    pub pagination: Pagination,
    /// Add/edit dialog
    pub form: FormSession,
    /// Last rejection, cleared by the next successful mutation
    pub last_error: Option<String>,
}

impl BoardState {
    /// Empty board with the default page size
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty board with a custom page size
    #[must_use]
    pub fn with_items_per_page(items_per_page: NonZeroUsize) -> Self {
        Self {
            pagination: Pagination::new(items_per_page),
            ..Self::default()
        }
    }

    /// Replaces the collection
    #[must_use]
    pub fn with_todos(mut self, todos: TodoCollection) -> Self {
        self.todos = todos;
        self
    }

    /// Todos passing the current filter, in collection order
    #[must_use]
    pub fn filtered(&self) -> Vec<&Todo> {
        filter_todos(self.todos.as_slice(), &self.filter)
    }

    /// Size of the filtered set
    #[must_use]
    pub fn filtered_count(&self) -> usize {
        self.todos.iter().filter(|t| self.filter.matches(t)).count()
    }

    /// Fresh snapshot for presentation
    #[must_use]
    pub fn view(&self) -> BoardView {
        BoardView::derive(&self.todos, &self.filter, &self.pagination, &self.form)
    }
}

/// Inputs to the board: user intents, then outcome events
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardAction {
    // ========== Intents ==========
    /// Search box changed
    SearchChanged {
        /// New search text
        term: String,
    },
    /// Status dropdown changed
    StatusFilterChanged {
        /// New selection
        filter: StatusFilter,
    },
    /// Priority dropdown changed
    PriorityFilterChanged {
        /// New selection
        filter: PriorityFilter,
    },
    /// Page button, previous or next pressed
    PageChanged {
        /// Requested 1-based page; clamped to the valid range
        page: usize,
    },
    /// "Add todo" pressed
    AddRequested,
    /// Edit pressed on a row
    EditRequested {
        /// Row's todo
        id: TodoId,
    },
    /// Draft title typed
    DraftTitleChanged {
        /// New title
        title: String,
    },
    /// Draft description typed
    DraftDescriptionChanged {
        /// New description
        description: String,
    },
    /// Draft status picked
    DraftStatusChanged {
        /// New status
        status: Status,
    },
    /// Draft priority picked
    DraftPriorityChanged {
        /// New priority
        priority: Priority,
    },
    /// Form submitted
    FormSubmitted,
    /// Dialog cancelled or closed
    FormClosed,
    /// Delete pressed on a row
    DeleteRequested {
        /// Row's todo
        id: TodoId,
    },

    // ========== Events ==========
    /// A todo was added
    TodoCreated {
        /// The stored todo
        todo: Todo,
    },
    /// A todo was edited
    TodoUpdated {
        /// The todo after the edit
        todo: Todo,
    },
    /// A todo was removed
    TodoDeleted {
        /// Removed todo's id
        id: TodoId,
    },
    /// A submit was refused; the form stays as it was
    SubmissionRejected {
        /// Why
        error: String,
    },
}

impl BoardAction {
    /// Whether this action reports an outcome rather than a user intent
    #[must_use]
    pub const fn is_event(&self) -> bool {
        matches!(
            self,
            Self::TodoCreated { .. }
                | Self::TodoUpdated { .. }
                | Self::TodoDeleted { .. }
                | Self::SubmissionRejected { .. }
        )
    }
}

/// Reducer for the todo board
#[derive(Clone, Debug, Default)]
pub struct BoardReducer;

impl BoardReducer {
    /// Creates a new `BoardReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Applies an outcome event; idempotent
    fn apply_event(state: &mut BoardState, action: &BoardAction) {
        match action {
            BoardAction::TodoCreated { .. }
            | BoardAction::TodoUpdated { .. }
            | BoardAction::TodoDeleted { .. } => {
                state.last_error = None;
            },
            BoardAction::SubmissionRejected { error } => {
                state.last_error = Some(error.clone());
            },
            // Intents are handled in `reduce`
            _ => {},
        }
    }

    fn emit(state: &mut BoardState, event: BoardAction) -> Effect<BoardAction> {
        Self::apply_event(state, &event);
        Effect::Send(event)
    }

    fn reject(state: &mut BoardState, error: &BoardError) -> SmallVec<[Effect<BoardAction>; 4]> {
        tracing::debug!(%error, "Submission rejected");
        smallvec![Self::emit(
            state,
            BoardAction::SubmissionRejected {
                error: error.to_string(),
            },
        )]
    }

    fn submit(state: &mut BoardState, env: &BoardEnvironment) -> SmallVec<[Effect<BoardAction>; 4]> {
        let session = state.form.clone();
        let submission = match state.form.submit() {
            Ok(submission) => submission,
            Err(error) => return Self::reject(state, &error),
        };

        match submission {
            Submission::Create(draft) => Self::create(state, env, session, draft),
            Submission::Update { id, draft } => match state.todos.update(&id, draft) {
                Ok(Some(todo)) => {
                    let todo = todo.clone();
                    tracing::debug!(id = %todo.id, "Todo updated");
                    smallvec![Self::emit(state, BoardAction::TodoUpdated { todo })]
                },
                Ok(None) => {
                    tracing::debug!(%id, "Edited todo no longer exists; ignoring");
                    SmallVec::new()
                },
                Err(error) => {
                    state.form = session;
                    Self::reject(state, &error)
                },
            },
        }
    }

    fn create(
        state: &mut BoardState,
        env: &BoardEnvironment,
        session: FormSession,
        draft: TodoDraft,
    ) -> SmallVec<[Effect<BoardAction>; 4]> {
        let id = TodoId::new(env.ids.next_id());
        match state.todos.add(draft, id, env.clock.now()) {
            Ok(todo) => {
                let todo = todo.clone();
                tracing::debug!(id = %todo.id, "Todo created");
                let created = Self::emit(state, BoardAction::TodoCreated { todo });
                smallvec![Effect::chain(vec![
                    created,
                    Effect::Send(BoardAction::PageChanged { page: 1 }),
                ])]
            },
            Err(error) => {
                tracing::warn!(%error, "Could not store new todo");
                state.form = session;
                Self::reject(state, &error)
            },
        }
    }
}

impl Reducer for BoardReducer {
    type State = BoardState;
    type Action = BoardAction;
    type Environment = BoardEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Filters & paging ==========
            BoardAction::SearchChanged { term } => {
                state.filter.search = term;
                SmallVec::new()
            },
            BoardAction::StatusFilterChanged { filter } => {
                state.filter.status = filter;
                SmallVec::new()
            },
            BoardAction::PriorityFilterChanged { filter } => {
                state.filter.priority = filter;
                SmallVec::new()
            },
            BoardAction::PageChanged { page } => {
                let count = state.filtered_count();
                let selected = state.pagination.go_to_page(page, count);
                if selected != page {
                    tracing::debug!(requested = page, selected, "Page request clamped");
                }
                SmallVec::new()
            },

            // ========== Form session ==========
            BoardAction::AddRequested => {
                state.form.open_create();
                SmallVec::new()
            },
            BoardAction::EditRequested { id } => {
                match state.todos.get(&id) {
                    Some(todo) => state.form.open_edit(todo),
                    None => tracing::debug!(%id, "Edit requested for unknown todo; ignoring"),
                }
                SmallVec::new()
            },
            BoardAction::DraftTitleChanged { title } => {
                state.form.set_title(title);
                SmallVec::new()
            },
            BoardAction::DraftDescriptionChanged { description } => {
                state.form.set_description(description);
                SmallVec::new()
            },
            BoardAction::DraftStatusChanged { status } => {
                state.form.set_status(status);
                SmallVec::new()
            },
            BoardAction::DraftPriorityChanged { priority } => {
                state.form.set_priority(priority);
                SmallVec::new()
            },
            BoardAction::FormSubmitted => Self::submit(state, env),
            BoardAction::FormClosed => {
                state.form.close();
                SmallVec::new()
            },

            // ========== Collection ==========
            BoardAction::DeleteRequested { id } => match state.todos.remove(&id) {
                // The current page is left alone, even if it is now past the end.
                Some(removed) => {
                    tracing::debug!(id = %removed.id, "Todo deleted");
                    smallvec![Self::emit(state, BoardAction::TodoDeleted { id: removed.id })]
                },
                None => SmallVec::new(),
            },

            // ========== Events ==========
            BoardAction::TodoCreated { .. }
            | BoardAction::TodoUpdated { .. }
            | BoardAction::TodoDeleted { .. }
            | BoardAction::SubmissionRejected { .. } => {
                Self::apply_event(state, &action);
                SmallVec::new()
            },
        }
    }
}
