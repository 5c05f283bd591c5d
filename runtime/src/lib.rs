//! # Taskdeck Runtime
//!
//! Runtime implementation for Taskdeck state containers.
//!
//! The [`Store`](store::Store) is the single writer for a feature's state:
//!
//! - **State ownership**: state lives behind a `RwLock`; readers get closures
//!   or owned snapshots, never a shared mutable reference
//! - **Reducer execution**: every action runs through the reducer under the
//!   write lock
//! - **Feedback loop**: `Effect::Send` actions are drained before `send`
//!   returns, so one user event is one atomic update
//! - **Observation**: every committed action is broadcast to subscribers
//!
//! ## Example
//!
//! ```ignore
//! use taskdeck_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use taskdeck_core::{effect::Effect, reducer::Reducer};

/// Metric recording for store activity
pub mod metrics;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Effects kept feeding actions back past the configured depth
        ///
        /// The send is rolled back: no state change from it is visible and
        /// none of its actions are broadcast.
        #[error("Feedback chain exceeded {max_depth} levels")]
        FeedbackLimitExceeded {
            /// The configured limit that was hit
            max_depth: usize,
        },
    }
}

/// Configuration for Store behavior
///
/// # Example
///
/// ```
/// use taskdeck_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_max_feedback_depth(8)
///     .with_broadcast_capacity(64);
/// assert_eq!(config.max_feedback_depth, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// How many levels of `Effect::Send` a single `send` may cascade through
    pub max_feedback_depth: usize,
    /// Number of actions buffered for slow observers
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Default feedback depth
    pub const DEFAULT_MAX_FEEDBACK_DEPTH: usize = 16;

    /// Default action broadcast capacity
    pub const DEFAULT_BROADCAST_CAPACITY: usize = 16;

    /// Set the maximum feedback depth
    #[must_use]
    pub const fn with_max_feedback_depth(mut self, depth: usize) -> Self {
        self.max_feedback_depth = depth;
        self
    }

    /// Set the action broadcast capacity (at least 1)
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_feedback_depth: Self::DEFAULT_MAX_FEEDBACK_DEPTH,
            broadcast_capacity: Self::DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::metrics::StoreMetrics;
    use super::{Effect, Reducer, StoreConfig, error::StoreError};
    use std::collections::VecDeque;
    use std::sync::Arc;
    use tokio::sync::{RwLock, broadcast};

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; the store is its only writer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (feedback loop, drained synchronously)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        /// Every committed action, in processing order.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Clone + std::fmt::Debug,
        S: Clone,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                config,
                action_broadcast,
            }
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> StoreConfig {
            self.config
        }

        /// Subscribe to every action the store commits
        ///
        /// The caller's action comes first, followed by any actions its
        /// effects fed back, in processing order. Rolled-back sends broadcast
        /// nothing.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Runs the reducer on a staged copy of the state
        /// 3. Feeds every `Effect::Send` action back, breadth first
        /// 4. Commits the staged state and broadcasts the processed actions
        ///
        /// Returns the number of actions processed (the caller's action plus
        /// feedback).
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::FeedbackLimitExceeded`] when effects cascade
        /// deeper than [`StoreConfig::max_feedback_depth`]. The state is left
        /// exactly as it was before the call.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<usize, StoreError> {
            StoreMetrics::record_action();
            tracing::debug!(?action, "Processing action");

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let mut staged = state.clone();
            let processed = self.drain(&mut staged, action).inspect_err(|error| {
                StoreMetrics::record_rollback();
                tracing::warn!(%error, "Discarding staged state");
            })?;

            *state = staged;

            // Broadcast under the lock so concurrent sends never interleave.
            let count = processed.len();
            for action in processed {
                // No subscribers is fine: observation is optional.
                let _ = self.action_broadcast.send(action);
            }
            drop(state);

            tracing::debug!(actions = count, "Action processing completed");
            Ok(count)
        }

        fn drain(&self, state: &mut S, action: A) -> Result<Vec<A>, StoreError> {
            let mut queue = VecDeque::from([(action, 0_usize)]);
            let mut processed = Vec::new();

            while let Some((action, depth)) = queue.pop_front() {
                if depth > self.config.max_feedback_depth {
                    return Err(StoreError::FeedbackLimitExceeded {
                        max_depth: self.config.max_feedback_depth,
                    });
                }

                let span = tracing::debug_span!("reducer_execution", depth);
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self
                    .reducer
                    .reduce(state, action.clone(), &self.environment);
                StoreMetrics::record_reduce(start.elapsed(), effects.len());
                tracing::trace!("Reducer completed, returned {} effects", effects.len());

                processed.push(action);
                for effect in effects {
                    for feedback in effect.into_actions() {
                        StoreMetrics::record_feedback();
                        queue.push_back((feedback, depth + 1));
                    }
                }
            }

            Ok(processed)
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.todos.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&state)
        }

        /// Owned copy of the current state
        pub async fn snapshot(&self) -> S {
            self.state.read().await.clone()
        }
    }

    impl<S, A, E, R> std::fmt::Debug for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("config", &self.config)
                .field("observers", &self.action_broadcast.receiver_count())
                .finish_non_exhaustive()
        }
    }
}

// Re-export commonly used items
pub use error::StoreError;
pub use store::Store;
