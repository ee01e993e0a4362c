//! Reducer logic for the todo list.
//!
//! Every branch builds a new snapshot and leaves the input untouched. The
//! item list is only copied by the branches that change it.

use crate::types::{TodoAction, TodoError, TodoState};
use redux_todo_core::reducer::Reducer;
use std::sync::Arc;

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Appends the pending input, unless it is blank
    fn add_item(state: &TodoState) -> TodoState {
        if state.pending_input.trim().is_empty() {
            return state.clone();
        }

        let mut items = Arc::clone(&state.items);
        Arc::make_mut(&mut items).push(state.pending_input.clone());

        TodoState {
            items,
            pending_input: String::new(),
        }
    }

    /// Removes the item at `index`, rejecting positions past the end
    fn remove_item(state: &TodoState, index: usize) -> Result<TodoState, TodoError> {
        let len = state.items.len();
        if index >= len {
            return Err(TodoError::IndexOutOfRange { index, len });
        }

        let mut items = Arc::clone(&state.items);
        Arc::make_mut(&mut items).remove(index);

        Ok(TodoState {
            items,
            pending_input: state.pending_input.clone(),
        })
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Error = TodoError;

    fn reduce(&self, state: &Self::State, action: Self::Action) -> Result<Self::State, Self::Error> {
        match action {
            TodoAction::SetPendingInput { value } => Ok(state.clone().with_pending_input(value)),
            TodoAction::AddItem => Ok(Self::add_item(state)),
            TodoAction::RemoveItem { index } => Self::remove_item(state, index),
            TodoAction::InitItems { items } => Ok(TodoState {
                items: Arc::new(items),
                pending_input: state.pending_input.clone(),
            }),
            TodoAction::Unknown => Ok(state.clone()),
        }
    }
}
