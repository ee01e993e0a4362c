//! Metric names recorded by the store.
//!
//! The store records through the `metrics` facade only. Nothing is exported
//! unless the host application installs a recorder; call
//! [`describe_metrics`] once after installing one so exporters carry help text.
//!
//! Every metric carries a `store` label with the store's configured name.

use metrics::{describe_counter, describe_histogram};

// Re-export metrics macros for use in other modules
pub use metrics::{counter, histogram};

/// Actions accepted by the reducer
pub const ACTIONS_DISPATCHED: &str = "store_actions_dispatched_total";

/// Actions the reducer rejected with an error
pub const ACTIONS_REJECTED: &str = "store_actions_rejected_total";

/// Individual listener invocations
pub const LISTENERS_NOTIFIED: &str = "store_listeners_notified_total";

/// Wall time spent inside `Reducer::reduce`
pub const REDUCER_DURATION: &str = "store_reducer_duration_seconds";

/// Register descriptions for all store metrics.
pub fn describe_metrics() {
    describe_counter!(
        ACTIONS_DISPATCHED,
        "Total number of actions accepted by the store reducer"
    );
    describe_counter!(
        ACTIONS_REJECTED,
        "Total number of actions rejected by the store reducer"
    );
    describe_counter!(
        LISTENERS_NOTIFIED,
        "Total number of listener notifications after accepted actions"
    );
    describe_histogram!(
        REDUCER_DURATION,
        metrics::Unit::Seconds,
        "Time taken to execute the reducer for one action"
    );
}
