//! Todo list demonstrating unidirectional state management.
//!
//! A [`Store`] holds the list and the pending input. The view dispatches
//! [`TodoAction`]s, the [`TodoReducer`] computes each new snapshot, and
//! listeners (here a terminal renderer) are told about every change.
//!
//! # Quick Start
//!
//! ```
//! use todo::{TodoAction, TodoStore, TodoState, TodoReducer};
//!
//! let store = TodoStore::new(TodoState::default(), TodoReducer::new());
//!
//! store.dispatch(TodoAction::set_pending_input("buy milk"))?;
//! store.dispatch(TodoAction::add_item())?;
//! store.dispatch(TodoAction::remove_item(0))?;
//!
//! assert_eq!(store.get_state().items(), ["learn English", "buy milk"]);
//! assert!(store.dispatch(TodoAction::remove_item(2)).is_err());
//! # Ok::<(), redux_todo_runtime::StoreError<todo::TodoError>>(())
//! ```

pub mod config;
pub mod reducer;
pub mod types;
pub mod view;

use redux_todo_runtime::Store;

// Re-export commonly used types
pub use config::{ConfigError, InitialLoad, TodoConfig};
pub use reducer::TodoReducer;
pub use types::{SEED_ITEMS, TodoAction, TodoError, TodoState};

/// Store specialised to the todo list
pub type TodoStore = Store<TodoState, TodoAction, TodoReducer>;

/// Build a store from configuration
#[must_use]
pub fn build_store(config: &TodoConfig) -> TodoStore {
    Store::with_config(config.initial_state(), TodoReducer::new(), config.store_config())
}
