//! Form/edit session: the transient draft behind the add and edit dialogs.
//!
//! The session is either closed or open on a draft. Opening always
//! re-initialises the draft, so switching targets drops unsaved edits.

use crate::error::BoardError;
use crate::types::{Priority, Status, Todo, TodoDraft, TodoId};
use serde::{Deserialize, Serialize};

/// What a submit will do with the draft
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum FormMode {
    /// Submit creates a new todo
    Create,
    /// Submit overwrites an existing todo
    Edit {
        /// The todo being edited
        target: TodoId,
    },
}

/// State of the add/edit dialog
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum FormSession {
    /// No dialog shown
    #[default]
    Closed,
    /// Dialog shown with a draft
    Open {
        /// Create or edit
        mode: FormMode,
        /// Uncommitted field values
        draft: TodoDraft,
    },
}

/// A validated draft ready to hand to the collection
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Add a new todo
    Create(TodoDraft),
    /// Overwrite the todo with `id`
    Update {
        /// Target todo
        id: TodoId,
        /// New field values
        draft: TodoDraft,
    },
}

impl FormSession {
    /// Opens a blank create-mode draft
    pub fn open_create(&mut self) {
        *self = Self::Open {
            mode: FormMode::Create,
            draft: TodoDraft::default(),
        };
    }

    /// Opens an edit-mode draft seeded from `todo`
    pub fn open_edit(&mut self, todo: &Todo) {
        *self = Self::Open {
            mode: FormMode::Edit {
                target: todo.id.clone(),
            },
            draft: TodoDraft::from(todo),
        };
    }

    /// Closes the dialog, discarding the draft
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Whether a dialog is shown
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// The open mode, if any
    #[must_use]
    pub const fn mode(&self) -> Option<&FormMode> {
        match self {
            Self::Closed => None,
            Self::Open { mode, .. } => Some(mode),
        }
    }

    /// The open draft, if any
    #[must_use]
    pub const fn draft(&self) -> Option<&TodoDraft> {
        match self {
            Self::Closed => None,
            Self::Open { draft, .. } => Some(draft),
        }
    }

    /// Mutable access to the open draft, if any
    pub fn draft_mut(&mut self) -> Option<&mut TodoDraft> {
        match self {
            Self::Closed => None,
            Self::Open { draft, .. } => Some(draft),
        }
    }

    /// Sets the draft title; ignored while closed
    pub fn set_title(&mut self, title: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.title = title.into();
        }
    }

    /// Sets the draft description; ignored while closed
    pub fn set_description(&mut self, description: impl Into<String>) {
        if let Some(draft) = self.draft_mut() {
            draft.description = description.into();
        }
    }

    /// Sets the draft status; ignored while closed
    pub fn set_status(&mut self, status: Status) {
        if let Some(draft) = self.draft_mut() {
            draft.status = status;
        }
    }

    /// Sets the draft priority; ignored while closed
    pub fn set_priority(&mut self, priority: Priority) {
        if let Some(draft) = self.draft_mut() {
            draft.priority = priority;
        }
    }

    /// Validates the draft and closes the session
    ///
    /// # Errors
    ///
    /// - [`BoardError::FormClosed`] if no dialog is open
    /// - [`BoardError::EmptyTitle`] if the title is blank; the session stays
    ///   open with the draft intact
    pub fn submit(&mut self) -> Result<Submission, BoardError> {
        let draft = self.draft().ok_or(BoardError::FormClosed)?;
        if draft.has_blank_title() {
            return Err(BoardError::EmptyTitle);
        }

        match std::mem::take(self) {
            Self::Open {
                mode: FormMode::Create,
                draft,
            } => Ok(Submission::Create(draft)),
            Self::Open {
                mode: FormMode::Edit { target },
                draft,
            } => Ok(Submission::Update { id: target, draft }),
            Self::Closed => Err(BoardError::FormClosed),
        }
    }
}

/// Read-only form state exposed to renderers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    /// Whether the dialog is shown
    pub is_open: bool,
    /// `true` when editing an existing todo
    pub is_editing: bool,
    /// The draft being edited, if open
    pub draft: Option<TodoDraft>,
}

impl From<&FormSession> for FormView {
    fn from(session: &FormSession) -> Self {
        Self {
            is_open: session.is_open(),
            is_editing: matches!(session.mode(), Some(FormMode::Edit { .. })),
            draft: session.draft().cloned(),
        }
    }
}
