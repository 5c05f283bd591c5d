//! # Taskdeck Testing
//!
//! Testing utilities and helpers for Taskdeck reducers.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then builder for reducers ([`ReducerTest`])
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use taskdeck_testing::{ReducerTest, SequentialIdGenerator, test_clock};
//!
//! ReducerTest::new(BoardReducer::new())
//!     .with_env(BoardEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIdGenerator::new())))
//!     .given_state(BoardState::new())
//!     .when_action(BoardAction::AddRequested)
//!     .then_state(|state| assert!(state.form.is_open()))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use taskdeck_core::environment::{Clock, IdGenerator};

/// Given-When-Then builder for reducers
pub mod reducer_test;

/// Deterministic implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock frozen at one instant
    ///
    /// ```
    /// use taskdeck_testing::mocks::FixedClock;
    /// use taskdeck_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Frozen at `time`
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// The clock board tests share: 2025-01-01 00:00:00 UTC
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::from_timestamp(1_735_689_600, 0).unwrap_or_default())
    }

    /// Predictable ids: `todo-1`, `todo-2`, ...
    ///
    /// ```
    /// use taskdeck_testing::mocks::SequentialIdGenerator;
    /// use taskdeck_core::environment::IdGenerator;
    ///
    /// let ids = SequentialIdGenerator::new();
    /// assert_eq!(ids.next_id(), "todo-1");
    /// assert_eq!(ids.next_id(), "todo-2");
    /// ```
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        prefix: String,
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Generator with the `todo` prefix, starting at 1
        #[must_use]
        pub fn new() -> Self {
            Self::with_prefix("todo")
        }

        /// Generator with a custom prefix, starting at 1
        #[must_use]
        pub fn with_prefix(prefix: impl Into<String>) -> Self {
            Self {
                prefix: prefix.into(),
                next: AtomicU64::new(1),
            }
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::Relaxed);
            format!("{}-{n}", self.prefix)
        }
    }

    /// Always hands out the same id; exercises duplicate-id handling
    #[derive(Debug, Clone)]
    pub struct ConstantIdGenerator(pub String);

    impl IdGenerator for ConstantIdGenerator {
        fn next_id(&self) -> String {
            self.0.clone()
        }
    }
}

// Re-export commonly used items
pub use mocks::{ConstantIdGenerator, FixedClock, SequentialIdGenerator, test_clock};
pub use reducer_test::{ReducerTest, assertions};
