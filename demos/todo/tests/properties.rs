//! Property tests for the todo reducer and store.

use proptest::prelude::*;
use redux_todo_core::reducer::Reducer;
use redux_todo_runtime::Store;
use redux_todo_testing::properties::{check_identity, check_input_untouched};
use std::sync::Arc;
use todo::{TodoAction, TodoReducer, TodoState};

fn item() -> impl Strategy<Value = String> {
    "[a-z ]{0,8}"
}

fn state() -> impl Strategy<Value = TodoState> {
    (prop::collection::vec(item(), 0..6), item())
        .prop_map(|(items, pending)| TodoState::from_items(items).with_pending_input(pending))
}

fn action() -> impl Strategy<Value = TodoAction> {
    prop_oneof![
        item().prop_map(TodoAction::set_pending_input),
        Just(TodoAction::add_item()),
        (0usize..8).prop_map(TodoAction::remove_item),
        prop::collection::vec(item(), 0..4).prop_map(TodoAction::init_items),
        Just(TodoAction::Unknown),
    ]
}

proptest! {
    #[test]
    fn unknown_action_is_identity(state in state()) {
        check_identity(&TodoReducer::new(), &state, TodoAction::Unknown)?;
    }

    #[test]
    fn reducer_never_mutates_input(state in state(), action in action()) {
        check_input_untouched(&TodoReducer::new(), &state, action)?;
    }

    #[test]
    fn blank_input_add_is_noop(items in prop::collection::vec(item(), 0..6), blank in "[ \t]{0,4}") {
        let state = TodoState::from_items(items).with_pending_input(blank);
        check_identity(&TodoReducer::new(), &state, TodoAction::add_item())?;
    }

    #[test]
    fn set_pending_input_leaves_items(state in state(), value in item()) {
        let next = TodoReducer::new().reduce(&state, TodoAction::set_pending_input(value.clone()));
        prop_assert!(next.is_ok());
        if let Ok(mut next) = next {
            prop_assert_eq!(&next.pending_input, &value);
            prop_assert_eq!(next.items(), state.items());

            Arc::make_mut(&mut next.items).push("extra".to_string());
            prop_assert_eq!(next.len(), state.len() + 1);
        }
    }

    #[test]
    fn removal_is_checked_against_length(state in state(), index in 0usize..8) {
        let result = TodoReducer::new().reduce(&state, TodoAction::remove_item(index));
        if index < state.len() {
            prop_assert_eq!(result.map(|next| next.len()), Ok(state.len() - 1));
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn store_dispatch_matches_replay(actions in prop::collection::vec(action(), 0..32)) {
        let store = Store::new(TodoState::default(), TodoReducer::new());
        let mut accepted = Vec::new();
        for action in actions {
            if store.dispatch(action.clone()).is_ok() {
                accepted.push(action);
            }
        }

        let replayed = redux_todo_core::replay(&TodoReducer::new(), TodoState::default(), accepted);
        prop_assert_eq!(replayed.as_ref(), Ok(&*store.get_state()));
    }
}
