//! In-memory todo board built on the Taskdeck reducer architecture.
//!
//! The board owns one ordered collection of todos plus the session state
//! around it: search term, status and priority dropdowns, current page and
//! the add/edit dialog. All of it is driven through [`BoardAction`]s and read
//! back as a [`BoardView`] snapshot, which is recomputed on every read.
//!
//! - Collection rules (prepend on add, in-place edit, delete by id)
//! - Case-insensitive search plus status/priority filters
//! - Fixed-size pagination that never auto-clamps after a delete
//! - A form session that validates the title before committing
//!
//! # Quick Start
//!
//! ```no_run
//! use taskdeck_board::{BoardAction, BoardEnvironment, BoardReducer, BoardState};
//! use taskdeck_runtime::Store;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::new(BoardState::new(), BoardReducer::new(), BoardEnvironment::live());
//!
//! store.send(BoardAction::AddRequested).await?;
//! store
//!     .send(BoardAction::DraftTitleChanged {
//!         title: "Buy milk".to_string(),
//!     })
//!     .await?;
//! store.send(BoardAction::FormSubmitted).await?;
//!
//! let view = store.state(BoardState::view).await;
//! assert_eq!(view.stats.total, 1);
//! # Ok(())
//! # }
//! ```

pub mod collection;
pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod pagination;
pub mod reducer;
pub mod render;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use collection::TodoCollection;
pub use config::BoardConfig;
pub use error::BoardError;
pub use filter::{TodoFilter, matches};
pub use form::{FormMode, FormSession, FormView, Submission};
pub use pagination::{DEFAULT_ITEMS_PER_PAGE, PageSummary, Pagination};
pub use reducer::{BoardAction, BoardEnvironment, BoardReducer, BoardState};
pub use render::TextView;
pub use types::{Priority, PriorityFilter, Stats, Status, StatusFilter, Todo, TodoDraft, TodoId};
pub use view::{BoardView, filter_todos};
