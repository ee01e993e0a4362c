//! # Redux Todo Testing
//!
//! Testing utilities and helpers for the Redux-style todo architecture.
//!
//! This crate provides:
//! - A deterministic clock for history timestamps
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - A listener that records every snapshot it receives ([`RecordingListener`])
//! - proptest-friendly property checks for reducers
//!
//! ## Example
//!
//! ```ignore
//! use redux_todo_testing::{RecordingListener, test_clock};
//! use redux_todo_runtime::{Store, StoreConfig};
//!
//! let store = Store::with_clock(TodoState::default(), TodoReducer::new(), StoreConfig::default(), Arc::new(test_clock()));
//! let recorder = RecordingListener::new();
//! store.subscribe(recorder.clone());
//!
//! store.dispatch(TodoAction::set_pending_input("buy milk"))?;
//! assert_eq!(recorder.len(), 1);
//! ```

use chrono::{DateTime, Utc};
use redux_todo_core::environment::Clock;


/// Listener that captures notifications
pub mod listener;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use redux_todo_testing::mocks::FixedClock;
    /// use redux_todo_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
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

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

/// Property-based testing utilities
///
/// Checks that return [`TestCaseError`](proptest::test_runner::TestCaseError)
/// so they can be used with `?` inside `proptest!` bodies.
pub mod properties {
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;
    use redux_todo_core::reducer::Reducer;
    use std::fmt::Debug;

    /// The reducer leaves its input snapshot untouched
    ///
    /// # Errors
    ///
    /// Fails the test case if `state` differs after `reduce` returns.
    pub fn check_input_untouched<R>(
        reducer: &R,
        state: &R::State,
        action: R::Action,
    ) -> Result<(), TestCaseError>
    where
        R: Reducer,
        R::State: Clone + PartialEq + Debug,
    {
        let before = state.clone();
        let _ = reducer.reduce(state, action);
        prop_assert_eq!(&before, state);
        Ok(())
    }

    /// The action is accepted and yields a state equal to the input
    ///
    /// # Errors
    ///
    /// Fails the test case if the reducer errors or changes the state.
    pub fn check_identity<R>(
        reducer: &R,
        state: &R::State,
        action: R::Action,
    ) -> Result<(), TestCaseError>
    where
        R: Reducer,
        R::State: PartialEq + Debug,
        R::Error: Debug,
    {
        match reducer.reduce(state, action) {
            Ok(next) => {
                prop_assert_eq!(&next, state);
                Ok(())
            }
            Err(error) => Err(TestCaseError::fail(format!(
                "expected identity transition, got error {error:?}"
            ))),
        }
    }
}

// Re-export commonly used items
pub use listener::RecordingListener;
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
