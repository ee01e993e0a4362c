//! # Redux Todo Runtime
//!
//! Runtime implementation for the Redux-style todo architecture.
//!
//! This crate provides the [`Store`]: the single owner of the current state
//! snapshot, the reducer that transitions it, and the listeners that observe
//! it.
//!
//! ## Core Components
//!
//! - **Store**: Holds the current snapshot and applies dispatched actions
//! - **Listeners**: Observers notified synchronously, in registration order
//! - **History**: Bounded record of accepted actions, replayable from the initial state
//!
//! ## Example
//!
//! ```ignore
//! use redux_todo_runtime::Store;
//!
//! let store = Store::new(TodoState::default(), TodoReducer::new());
//!
//! let id = store.subscribe(|state: &TodoState| println!("{} items", state.len()));
//!
//! store.dispatch(TodoAction::set_pending_input("buy milk"))?;
//! store.dispatch(TodoAction::add_item())?;
//!
//! let count = store.state(|s| s.len());
//! store.unsubscribe(id);
//! ```

use redux_todo_core::{environment::Clock, listener::Listener, reducer::Reducer};
use std::sync::Arc;

/// Bounded action history
pub mod history;

/// Metric names and descriptions
pub mod metrics;

pub use history::RecordedAction;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, PartialEq, Eq)]
    pub enum StoreError<E>
    where
        E: std::error::Error + 'static,
    {
        /// The reducer rejected the action
        ///
        /// The store keeps its previous state and listeners are not notified.
        #[error("Action rejected: {0}")]
        Reducer(#[source] E),

        /// History no longer holds every accepted action
        ///
        /// Returned by `replay_history` once the ring buffer has evicted
        /// entries (or when history is disabled), since the current state can
        /// no longer be re-derived from the initial one.
        #[error("History incomplete: {retained} of {accepted} accepted actions retained")]
        HistoryIncomplete {
            /// Actions still held in history
            retained: usize,
            /// Actions accepted since the store was created
            accepted: u64,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use redux_todo_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_name("todo")
///     .with_history_capacity(256);
///
/// assert_eq!(config.history_capacity, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Label attached to log spans and metrics
    pub name: String,
    /// Number of accepted actions kept for inspection and replay (0 disables)
    pub history_capacity: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub fn new(name: impl Into<String>, history_capacity: usize) -> Self {
        Self {
            name: name.into(),
            history_capacity,
        }
    }

    /// Set the store name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".to_string(),
            history_capacity: 64,
        }
    }
}

/// Handle returned by [`Store::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Store module - The runtime state container
pub mod store {
    use super::{
        Arc, Clock, Listener, Reducer, StoreConfig, StoreError, SubscriptionId,
        history::{ActionHistory, RecordedAction},
        metrics::{self, counter, histogram},
    };
    use redux_todo_core::{environment::SystemClock, replay};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
    use std::time::Instant;

    type SharedListener<S> = Arc<dyn Listener<S>>;

    /// Bookkeeping for the single active notification pass
    #[derive(Debug, Default)]
    struct Notification {
        /// A pass is delivering to listeners
        running: bool,
        /// State changed since the running pass last read it
        pending: bool,
    }

    /// Clears `running` if a listener unwinds out of the pass
    struct PassGuard<'a> {
        notification: &'a Mutex<Notification>,
        finished: bool,
    }

    impl Drop for PassGuard<'_> {
        fn drop(&mut self) {
            if !self.finished {
                self.notification
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .running = false;
            }
        }
    }

    /// The Store - owner of the current state snapshot
    ///
    /// The Store manages:
    /// 1. State (an `Arc` snapshot behind an `RwLock`, replaced on every accepted action)
    /// 2. Reducer (business logic)
    /// 3. Listeners (notified in registration order)
    /// 4. History (bounded record of accepted actions)
    ///
    /// Dispatch is synchronous. The reducer runs under the state write lock,
    /// so concurrent dispatches are serialized. Listeners run after the lock
    /// is released and may dispatch again.
    ///
    /// Only one notification pass runs at a time. A dispatch that lands while
    /// a pass is running (from a listener, or from another thread) leaves its
    /// notification to that pass, which repeats until no change is pending.
    /// Each pass hands listeners the current snapshot, so the last state every
    /// listener sees is the store's latest.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
    {
        name: String,
        initial: Arc<S>,
        state: RwLock<Arc<S>>,
        reducer: R,
        listeners: Mutex<Vec<(SubscriptionId, SharedListener<S>)>>,
        next_subscription: AtomicU64,
        history: Mutex<ActionHistory<A>>,
        notification: Mutex<Notification>,
        clock: Arc<dyn Clock>,
    }

    impl<S, A, R> Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
        R::Error: std::error::Error + 'static,
        A: Clone + std::fmt::Debug,
    {
        /// Create a new store with initial state and reducer
        ///
        /// Uses [`StoreConfig::default`] and the system clock.
        #[must_use]
        pub fn new(initial_state: S, reducer: R) -> Self {
            Self::with_config(initial_state, reducer, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, config: StoreConfig) -> Self {
            Self::with_clock(initial_state, reducer, config, Arc::new(SystemClock))
        }

        /// Create a new Store with custom configuration and clock
        ///
        /// The clock stamps [`RecordedAction::recorded_at`]; tests pass a fixed one.
        #[must_use]
        pub fn with_clock(
            initial_state: S,
            reducer: R,
            config: StoreConfig,
            clock: Arc<dyn Clock>,
        ) -> Self {
            let initial = Arc::new(initial_state);

            Self {
                name: config.name,
                state: RwLock::new(Arc::clone(&initial)),
                initial,
                reducer,
                listeners: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(1),
                history: Mutex::new(ActionHistory::new(config.history_capacity)),
                notification: Mutex::new(Notification::default()),
                clock,
            }
        }

        /// The name this store logs and reports metrics under
        #[must_use]
        pub fn name(&self) -> &str {
            &self.name
        }

        /// Apply an action and notify listeners
        ///
        /// Runs the reducer against the current snapshot. On success the
        /// result becomes the current state, the action is recorded, and every
        /// listener is called in registration order with the current state.
        ///
        /// When no other notification pass is running, listeners have been
        /// called before this method returns. A dispatch made from inside a
        /// listener returns at once; the outer pass notifies for it.
        ///
        /// # Returns
        ///
        /// The new snapshot.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::Reducer`] if the reducer rejects the action.
        /// The current state is left as it was and no listener is called.
        #[tracing::instrument(skip(self), fields(store = %self.name), name = "store_dispatch")]
        pub fn dispatch(&self, action: A) -> Result<Arc<S>, StoreError<R::Error>> {
            let next = {
                let mut current = self.write_state();
                let mut history = self.lock_history();

                let recorded = history.is_recording().then(|| action.clone());

                let start = Instant::now();
                let result = self.reducer.reduce(&**current, action);
                histogram!(metrics::REDUCER_DURATION, "store" => self.name.clone())
                    .record(start.elapsed().as_secs_f64());

                match result {
                    Ok(next) => {
                        let next = Arc::new(next);
                        *current = Arc::clone(&next);
                        history.record(recorded, self.clock.now());
                        counter!(metrics::ACTIONS_DISPATCHED, "store" => self.name.clone())
                            .increment(1);
                        tracing::debug!(sequence = history.accepted(), "Action applied");
                        next
                    }
                    Err(error) => {
                        counter!(metrics::ACTIONS_REJECTED, "store" => self.name.clone())
                            .increment(1);
                        tracing::warn!(%error, "Action rejected by reducer");
                        return Err(StoreError::Reducer(error));
                    }
                }
            };

            self.notify();
            Ok(next)
        }

        /// Register a listener, returning a handle for [`Store::unsubscribe`]
        ///
        /// Listeners are called after every successful dispatch, in the order
        /// they were registered. They are not called for the current state at
        /// subscription time.
        pub fn subscribe<L>(&self, listener: L) -> SubscriptionId
        where
            L: Listener<S> + 'static,
        {
            let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
            self.lock_listeners().push((id, Arc::new(listener)));
            tracing::trace!(store = %self.name, ?id, "Listener subscribed");
            id
        }

        /// Remove a listener
        ///
        /// Returns `false` if `id` was never issued by this store or was
        /// already removed.
        pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
            let mut listeners = self.lock_listeners();
            let before = listeners.len();
            listeners.retain(|(existing, _)| *existing != id);
            before != listeners.len()
        }

        /// Number of registered listeners
        #[must_use]
        pub fn listener_count(&self) -> usize {
            self.lock_listeners().len()
        }

        /// Current snapshot
        ///
        /// The snapshot is immutable; later dispatches replace the store's
        /// pointer and never touch a snapshot already handed out.
        #[must_use]
        pub fn get_state(&self) -> Arc<S> {
            let state = self.read_state();
            Arc::clone(&*state)
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let item_count = store.state(|s| s.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.read_state();
            f(&**state)
        }

        /// Recorded actions, oldest first
        #[must_use]
        pub fn history(&self) -> Vec<RecordedAction<A>> {
            self.lock_history().entries().cloned().collect()
        }

        /// Number of actions accepted since the store was created
        #[must_use]
        pub fn accepted_count(&self) -> u64 {
            self.lock_history().accepted()
        }

        /// Re-derive the current state by replaying history over the initial state
        ///
        /// # Errors
        ///
        /// - [`StoreError::HistoryIncomplete`]: history was disabled or has evicted entries
        /// - [`StoreError::Reducer`]: the reducer rejected a recorded action
        pub fn replay_history(&self) -> Result<S, StoreError<R::Error>>
        where
            S: Clone,
        {
            let actions: Vec<A> = {
                let history = self.lock_history();
                let retained = history.len();
                let accepted = history.accepted();
                if u64::try_from(retained).map_or(true, |retained| retained != accepted) {
                    return Err(StoreError::HistoryIncomplete { retained, accepted });
                }
                history.entries().map(|entry| entry.action.clone()).collect()
            };

            replay(&self.reducer, S::clone(&self.initial), actions).map_err(StoreError::Reducer)
        }

        fn notify(&self) {
            {
                let mut notification = self.lock_notification();
                notification.pending = true;
                if notification.running {
                    tracing::trace!("Notification left to the running pass");
                    return;
                }
                notification.running = true;
            }

            let mut guard = PassGuard {
                notification: &self.notification,
                finished: false,
            };

            loop {
                {
                    let mut notification = self.lock_notification();
                    if !notification.pending {
                        notification.running = false;
                        guard.finished = true;
                        return;
                    }
                    notification.pending = false;
                }

                let state = self.get_state();
                let listeners: Vec<SharedListener<S>> = self
                    .lock_listeners()
                    .iter()
                    .map(|(_, listener)| Arc::clone(listener))
                    .collect();

                tracing::trace!(count = listeners.len(), "Notifying listeners");
                for listener in &listeners {
                    listener.on_state_change(&state);
                }

                if !listeners.is_empty() {
                    counter!(metrics::LISTENERS_NOTIFIED, "store" => self.name.clone())
                        .increment(listeners.len() as u64);
                }
            }
        }

        // A panicking listener or reducer must not wedge the store, so
        // poisoned locks are recovered rather than propagated.
        fn read_state(&self) -> RwLockReadGuard<'_, Arc<S>> {
            self.state.read().unwrap_or_else(PoisonError::into_inner)
        }

        fn write_state(&self) -> RwLockWriteGuard<'_, Arc<S>> {
            self.state.write().unwrap_or_else(PoisonError::into_inner)
        }

        fn lock_listeners(&self) -> MutexGuard<'_, Vec<(SubscriptionId, SharedListener<S>)>> {
            self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn lock_history(&self) -> MutexGuard<'_, ActionHistory<A>> {
            self.history.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn lock_notification(&self) -> MutexGuard<'_, Notification> {
            self.notification.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    impl<S, A, R> std::fmt::Debug for Store<S, A, R>
    where
        R: Reducer<State = S, Action = A>,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("Store")
                .field("name", &self.name)
                .finish_non_exhaustive()
        }
    }
}

pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;
    use redux_todo_testing::{RecordingListener, test_clock};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    struct Lines {
        lines: Vec<String>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum LineAction {
        Push(String),
        Pop,
    }

    #[derive(Debug, PartialEq, Eq, thiserror::Error)]
    #[error("nothing to pop")]
    struct Empty;

    struct LineReducer;

    impl Reducer for LineReducer {
        type State = Lines;
        type Action = LineAction;
        type Error = Empty;

        fn reduce(&self, state: &Lines, action: LineAction) -> Result<Lines, Empty> {
            let mut next = state.clone();
            match action {
                LineAction::Push(line) => next.lines.push(line),
                LineAction::Pop => {
                    next.lines.pop().ok_or(Empty)?;
                }
            }
            Ok(next)
        }
    }

    fn push(line: &str) -> LineAction {
        LineAction::Push(line.to_string())
    }

    fn test_store(history_capacity: usize) -> Store<Lines, LineAction, LineReducer> {
        Store::with_clock(
            Lines::default(),
            LineReducer,
            StoreConfig::default()
                .with_name("lines")
                .with_history_capacity(history_capacity),
            Arc::new(test_clock()),
        )
    }

    #[test]
    fn dispatch_replaces_state_and_returns_snapshot() {
        let store = test_store(8);

        let snapshot = store.dispatch(push("a")).ok();

        assert_eq!(snapshot.map(|s| s.lines.clone()), Some(vec!["a".to_string()]));
        assert_eq!(store.state(|s| s.lines.len()), 1);
    }

    #[test]
    fn rejected_action_keeps_state_and_skips_listeners() {
        let store = test_store(8);
        let recorder = RecordingListener::new();
        store.subscribe(recorder.clone());

        let result = store.dispatch(LineAction::Pop);

        assert_eq!(result, Err(StoreError::Reducer(Empty)));
        assert_eq!(*store.get_state(), Lines::default());
        assert!(recorder.is_empty());
        assert_eq!(store.accepted_count(), 0);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let store = test_store(8);
        let order = Arc::new(std::sync::Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            store.subscribe(move |_: &Lines| {
                if let Ok(mut order) = order.lock() {
                    order.push(tag);
                }
            });
        }

        let _ = store.dispatch(push("x"));

        let seen = order.lock().map(|o| o.clone()).unwrap_or_default();
        assert_eq!(seen, vec!["first", "second", "third"]);
    }

    #[test]
    fn listener_receives_new_state() {
        let store = test_store(8);
        let recorder = RecordingListener::new();
        store.subscribe(recorder.clone());

        let _ = store.dispatch(push("a"));
        let _ = store.dispatch(push("b"));

        let seen: Vec<usize> = recorder.snapshots().iter().map(|s| s.lines.len()).collect();
        assert_eq!(seen, vec![1, 2]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let store = test_store(8);
        let recorder = RecordingListener::new();
        let id = store.subscribe(recorder.clone());

        let _ = store.dispatch(push("a"));
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        let _ = store.dispatch(push("b"));

        assert_eq!(recorder.len(), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn listener_may_dispatch_reentrantly() {
        let store = Arc::new(test_store(8));
        let calls = Arc::new(AtomicUsize::new(0));

        {
            let weak = Arc::downgrade(&store);
            let calls = Arc::clone(&calls);
            store.subscribe(move |state: &Lines| {
                calls.fetch_add(1, Ordering::SeqCst);
                if state.lines.len() == 1 {
                    if let Some(store) = weak.upgrade() {
                        let _ = store.dispatch(push("echo"));
                    }
                }
            });
        }

        let _ = store.dispatch(push("a"));

        assert_eq!(store.state(|s| s.lines.clone()), vec!["a", "echo"]);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn nested_dispatch_leaves_later_listeners_on_latest_state() {
        let store = Arc::new(test_store(8));
        let recorder = RecordingListener::new();

        {
            let weak = Arc::downgrade(&store);
            store.subscribe(move |state: &Lines| {
                if state.lines == ["a"] {
                    if let Some(store) = weak.upgrade() {
                        let _ = store.dispatch(push("echo"));
                    }
                }
            });
        }
        store.subscribe(recorder.clone());

        let _ = store.dispatch(push("a"));

        let seen: Vec<Vec<String>> = recorder.snapshots().into_iter().map(|s| s.lines).collect();
        assert_eq!(seen, vec![vec!["a"], vec!["a", "echo"]]);
        assert_eq!(recorder.last().as_ref(), Some(&*store.get_state()));
    }

    #[test]
    fn panicking_listener_does_not_block_later_notifications() {
        let store = Arc::new(test_store(8));
        let recorder = RecordingListener::new();
        store.subscribe(|state: &Lines| {
            assert!(state.lines.len() != 1, "first push");
        });
        store.subscribe(recorder.clone());

        let panicked = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                let _ = store.dispatch(push("a"));
            })
            .join()
            .is_err()
        };
        let _ = store.dispatch(push("b"));

        assert!(panicked);
        assert_eq!(recorder.last().map(|s| s.lines.len()), Some(2));
    }

    #[test]
    fn huge_history_capacity_does_not_preallocate() {
        let store = test_store(usize::MAX);

        let _ = store.dispatch(push("a"));

        assert_eq!(store.history().len(), 1);
        assert_eq!(store.replay_history().map(|s| s.lines), Ok(vec!["a".to_string()]));
    }

    #[test]
    fn earlier_snapshots_are_untouched_by_later_dispatch() {
        let store = test_store(8);
        let _ = store.dispatch(push("a"));
        let before = store.get_state();

        let _ = store.dispatch(push("b"));

        assert_eq!(before.lines, vec!["a"]);
        assert_eq!(store.get_state().lines, vec!["a", "b"]);
    }

    #[test]
    fn history_records_accepted_actions_with_clock_time() {
        let store = test_store(8);
        let _ = store.dispatch(push("a"));
        let _ = store.dispatch(LineAction::Pop);
        let _ = store.dispatch(LineAction::Pop); // rejected

        let history = store.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].sequence, 1);
        assert_eq!(history[1].action, LineAction::Pop);
        assert!(history.iter().all(|h| h.recorded_at == test_clock().now()));
    }

    #[test]
    fn replay_history_reproduces_current_state() {
        let store = test_store(8);
        for action in [push("a"), push("b"), LineAction::Pop, push("c")] {
            let _ = store.dispatch(action);
        }

        let replayed = store.replay_history();

        assert_eq!(replayed.as_ref(), Ok(&*store.get_state()));
    }

    #[test]
    fn replay_history_refuses_after_eviction() {
        let store = test_store(2);
        for line in ["a", "b", "c"] {
            let _ = store.dispatch(push(line));
        }

        assert_eq!(
            store.replay_history(),
            Err(StoreError::HistoryIncomplete {
                retained: 2,
                accepted: 3
            })
        );
    }

    #[test]
    fn disabled_history_still_counts() {
        let store = test_store(0);
        let _ = store.dispatch(push("a"));

        assert!(store.history().is_empty());
        assert_eq!(store.accepted_count(), 1);
        assert!(matches!(
            store.replay_history(),
            Err(StoreError::HistoryIncomplete { .. })
        ));
    }

    #[test]
    fn store_is_shareable_across_threads() {
        let store = Arc::new(test_store(0));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    let _ = store.dispatch(push(&i.to_string()));
                })
            })
            .collect();
        for handle in handles {
            let _ = handle.join();
        }

        assert_eq!(store.state(|s| s.lines.len()), 8);
        assert_eq!(store.accepted_count(), 8);
    }

    #[test]
    fn config_builder_overrides_defaults() {
        let config = StoreConfig::default().with_name("todo").with_history_capacity(3);
        assert_eq!(config, StoreConfig::new("todo", 3));
        assert_eq!(StoreConfig::default().history_capacity, 64);
    }
}
