//! A listener double that records the snapshots a store hands it.

use redux_todo_core::listener::Listener;
use std::sync::{Arc, Mutex, PoisonError};

/// Listener that keeps a copy of every snapshot it is notified with
///
/// Clones share the same recording, so subscribe one clone and inspect
/// another:
///
/// ```
/// use redux_todo_core::listener::Listener;
/// use redux_todo_testing::RecordingListener;
///
/// let recorder = RecordingListener::new();
/// let subscribed = recorder.clone();
/// subscribed.on_state_change(&1);
/// subscribed.on_state_change(&2);
///
/// assert_eq!(recorder.snapshots(), vec![1, 2]);
/// ```
#[derive(Debug)]
pub struct RecordingListener<S> {
    seen: Arc<Mutex<Vec<S>>>,
}

impl<S: Clone> RecordingListener<S> {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every snapshot received so far, oldest first
    #[must_use]
    pub fn snapshots(&self) -> Vec<S> {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// The most recent snapshot
    #[must_use]
    pub fn last(&self) -> Option<S> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Number of notifications received
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no notification has been received
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Clone> Default for RecordingListener<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for RecordingListener<S> {
    fn clone(&self) -> Self {
        Self {
            seen: Arc::clone(&self.seen),
        }
    }
}

impl<S: Clone + Send> Listener<S> for RecordingListener<S> {
    fn on_state_change(&self, state: &S) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(state.clone());
    }
}
