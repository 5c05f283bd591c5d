//! Error types for the todo board.

use thiserror::Error;

/// Recoverable conditions raised by board operations.
///
/// None of these are fatal. The reducer records them in
/// `BoardState::last_error` and leaves the rest of the state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A draft was submitted whose title is blank after trimming
    #[error("Todo title cannot be empty")]
    EmptyTitle,

    /// The id generator produced an id that is already in the collection
    #[error("Todo with ID {0} already exists")]
    DuplicateId(String),

    /// A submit arrived while no form session was open
    #[error("No form is open")]
    FormClosed,

    /// A status name outside `pending | in-progress | completed`
    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    /// A priority name outside `low | medium | high`
    #[error("Unknown priority: {0}")]
    UnknownPriority(String),

    /// An environment variable held a value that could not be used
    #[error("Invalid configuration for {key}: {reason}")]
    InvalidConfig {
        /// Environment variable name
        key: &'static str,
        /// What was wrong with it
        reason: String,
    },
}
