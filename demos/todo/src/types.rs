//! Domain types for the todo list.
//!
//! The state is a list of item titles plus the text currently typed into the
//! input box. Actions describe every change the view can request.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Items a fresh list starts with
pub const SEED_ITEMS: [&str; 2] = ["learn React", "learn English"];

/// State of the todo list
///
/// `items` sits behind an `Arc` so transitions that leave the list alone
/// share it with the previous snapshot. Writers go through
/// [`Arc::make_mut`], which copies the list whenever another snapshot still
/// holds it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// Item titles in insertion order (duplicates allowed)
    pub items: Arc<Vec<String>>,
    /// Text typed but not yet added
    pub pending_input: String,
}

impl TodoState {
    /// Creates a state with no items and an empty input
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            pending_input: String::new(),
        }
    }

    /// Creates a state with the given items and an empty input
    #[must_use]
    pub fn from_items<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            items: Arc::new(items.into_iter().map(Into::into).collect()),
            pending_input: String::new(),
        }
    }

    /// Returns a copy with the pending input replaced
    #[must_use]
    pub fn with_pending_input(mut self, value: impl Into<String>) -> Self {
        self.pending_input = value.into();
        self
    }

    /// Item titles in order
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for TodoState {
    /// The seeded startup snapshot: two items, empty input
    fn default() -> Self {
        Self::from_items(SEED_ITEMS)
    }
}

/// Actions the view can dispatch
///
/// The JSON form is tagged by `type`, using the tag names of the original
/// web client (`change_input_value`, `add_todo_item`, `delete_todo_item`,
/// `init_list_data`). Any other tag decodes to [`TodoAction::Unknown`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TodoAction {
    /// Replace the text in the input box
    #[serde(rename = "change_input_value")]
    SetPendingInput {
        /// New input text
        value: String,
    },

    /// Append the pending input to the list and clear it
    #[serde(rename = "add_todo_item")]
    AddItem,

    /// Remove the item at `index`
    #[serde(rename = "delete_todo_item")]
    RemoveItem {
        /// Position in the list, as rendered by the view
        index: usize,
    },

    /// Replace the whole list, e.g. after an initial load
    #[serde(rename = "init_list_data")]
    InitItems {
        /// New item titles
        #[serde(alias = "data")]
        items: Vec<String>,
    },

    /// An action this version does not understand; reduces to no change
    #[serde(other)]
    Unknown,
}

impl TodoAction {
    /// `SetPendingInput` with the given text
    #[must_use]
    pub fn set_pending_input(value: impl Into<String>) -> Self {
        Self::SetPendingInput {
            value: value.into(),
        }
    }

    /// `AddItem`
    #[must_use]
    pub const fn add_item() -> Self {
        Self::AddItem
    }

    /// `RemoveItem` at `index`
    #[must_use]
    pub const fn remove_item(index: usize) -> Self {
        Self::RemoveItem { index }
    }

    /// `InitItems` with the given titles
    #[must_use]
    pub fn init_items<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::InitItems {
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Decodes an action from its JSON form
    ///
    /// # Errors
    ///
    /// Returns the decoder error if `json` is not an object with a string
    /// `type`, or if a known variant's payload is missing or mistyped.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Errors raised by the todo reducer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    /// `RemoveItem` pointed past the end of the list
    #[error("index {index} out of range for list of length {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// List length at the time of the request
        len: usize,
    },
}
