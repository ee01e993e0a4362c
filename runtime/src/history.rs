//! Bounded record of the actions a store has accepted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;

/// An action accepted by the store, stamped with its position and time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedAction<A> {
    /// 1-based position among all accepted actions (evicted ones included)
    pub sequence: u64,
    /// When the store accepted the action
    pub recorded_at: DateTime<Utc>,
    /// The action itself
    pub action: A,
}

/// Ring buffer of the most recent accepted actions.
///
/// A capacity of zero disables recording, but the sequence counter still
/// advances so callers can tell how many actions were accepted overall.
#[derive(Debug)]
pub(crate) struct ActionHistory<A> {
    capacity: usize,
    entries: VecDeque<RecordedAction<A>>,
    accepted: u64,
}

impl<A> ActionHistory<A> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::new(),
            accepted: 0,
        }
    }

    pub(crate) const fn is_recording(&self) -> bool {
        self.capacity > 0
    }

    /// Count an accepted action, keeping it if recording is on.
    pub(crate) fn record(&mut self, action: Option<A>, recorded_at: DateTime<Utc>) {
        self.accepted += 1;

        let Some(action) = action else {
            return;
        };
        if !self.is_recording() {
            return;
        }

        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(RecordedAction {
            sequence: self.accepted,
            recorded_at,
            action,
        });
    }

    pub(crate) const fn accepted(&self) -> u64 {
        self.accepted
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = &RecordedAction<A>> {
        self.entries.iter()
    }
}
