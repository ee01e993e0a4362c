//! # Redux Todo Core
//!
//! Core traits for a unidirectional state-management architecture.
//!
//! ## Core Concepts
//!
//! - **State**: An immutable snapshot of a feature's data
//! - **Action**: A tagged description of an intended state change
//! - **Reducer**: Pure function `(&State, Action) → Result<State, Error>`
//! - **Listener**: Observer told about every new snapshot
//! - **Clock**: Injected time source, used by the runtime to stamp history
//!
//! ## Architecture Principles
//!
//! - Unidirectional Data Flow
//! - Pure transitions (the input snapshot is never mutated)
//! - Explicit errors instead of silently corrupted state
//!
//! ## Example
//!
//! ```
//! use redux_todo_core::reducer::Reducer;
//!
//! #[derive(Clone, Debug, PartialEq, Eq)]
//! struct Counter {
//!     count: u32,
//! }
//!
//! enum CounterAction {
//!     Increment,
//!     Reset,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = Counter;
//!     type Action = CounterAction;
//!     type Error = std::convert::Infallible;
//!
//!     fn reduce(&self, state: &Counter, action: CounterAction) -> Result<Counter, Self::Error> {
//!         Ok(match action {
//!             CounterAction::Increment => Counter { count: state.count + 1 },
//!             CounterAction::Reset => Counter { count: 0 },
//!         })
//!     }
//! }
//!
//! let next = CounterReducer.reduce(&Counter { count: 1 }, CounterAction::Increment);
//! assert_eq!(next, Ok(Counter { count: 2 }));
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action) → State`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Error`: Raised when an action cannot be applied to the given state
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for TodoReducer {
    ///     type State = TodoState;
    ///     type Action = TodoAction;
    ///     type Error = TodoError;
    ///
    ///     fn reduce(&self, state: &TodoState, action: TodoAction) -> Result<TodoState, TodoError> {
    ///         match action {
    ///             TodoAction::AddItem => Ok(state.with_pending_committed()),
    ///             _ => Ok(state.clone()),
    ///         }
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The error produced when an action is rejected
        type Error;

        /// Reduce an action into the next state
        ///
        /// This is a pure function that:
        /// 1. Reads the current snapshot
        /// 2. Builds the next snapshot (sharing unchanged data where possible)
        /// 3. Never mutates `state`
        ///
        /// # Errors
        ///
        /// Returns `Self::Error` when the action is not applicable to `state`.
        /// Callers must keep the previous snapshot in that case.
        fn reduce(
            &self,
            state: &Self::State,
            action: Self::Action,
        ) -> Result<Self::State, Self::Error>;
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits so tests can
/// substitute deterministic implementations.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

/// Listener module - Observers notified after every accepted action
pub mod listener {
    /// A view-layer observer of state changes
    ///
    /// Implemented for every `Fn(&S) + Send + Sync` closure, so most callers
    /// subscribe a closure directly:
    ///
    /// ```ignore
    /// store.subscribe(|state: &TodoState| render(state));
    /// ```
    pub trait Listener<S>: Send + Sync {
        /// Called with the store's current snapshot after a successful dispatch
        fn on_state_change(&self, state: &S);
    }

    impl<S, F> Listener<S> for F
    where
        F: Fn(&S) + Send + Sync,
    {
        fn on_state_change(&self, state: &S) {
            self(state);
        }
    }
}

/// Replay module - Re-derive state by folding a reducer over actions
pub mod replay {
    use super::reducer::Reducer;

    /// Fold `reducer` over `actions`, starting from `initial`.
    ///
    /// Replaying the actions a store accepted, from the store's initial
    /// state, yields the store's current state.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error the reducer produces.
    pub fn replay<R, I>(reducer: &R, initial: R::State, actions: I) -> Result<R::State, R::Error>
    where
        R: Reducer,
        I: IntoIterator<Item = R::Action>,
    {
        actions
            .into_iter()
            .try_fold(initial, |state, action| reducer.reduce(&state, action))
    }
}

pub use replay::replay;
