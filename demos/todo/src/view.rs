//! Terminal view layer.
//!
//! Stands in for the original web components: a listener that re-renders the
//! list on every state change, and a parser that turns typed commands into
//! actions.

use crate::types::{TodoAction, TodoState};
use redux_todo_core::listener::Listener;
use std::fmt::Write as _;
use std::io::Write;
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

/// Help text printed by the `help` command
pub const HELP: &str = "\
commands:
  set <text>        change the input box
  add [<text>]      add the input box (or <text>) to the list
  rm <index>        remove an item (alias: delete)
  init <a>|<b>|...  replace the whole list
  json <action>     dispatch a raw action, e.g. {\"type\":\"add_todo_item\"}
  list              show the list
  history           show accepted actions
  help              show this message
  quit              leave (alias: exit)
";

/// Render a snapshot as text, one numbered item per line
#[must_use]
pub fn render(state: &TodoState) -> String {
    let mut out = String::new();
    if state.is_empty() {
        out.push_str("  (no items)\n");
    }
    for (index, item) in state.items().iter().enumerate() {
        let _ = writeln!(out, "  [{index}] {item}");
    }
    let _ = writeln!(out, "  input: {:?}", state.pending_input);
    out
}

/// Listener that writes a fresh rendering on every notification
pub struct TerminalView<W> {
    out: Mutex<W>,
}

impl<W: Write> TerminalView<W> {
    /// Create a view writing to `out`
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Consume the view, returning its writer
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Listener<TodoState> for TerminalView<W> {
    fn on_state_change(&self, state: &TodoState) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = out.write_all(render(state).as_bytes()).and_then(|()| out.flush()) {
            tracing::warn!(%error, "Failed to render state");
        }
    }
}

/// A parsed line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Dispatch these actions in order
    Dispatch(Vec<TodoAction>),
    /// Print the current state
    List,
    /// Print the action history
    History,
    /// Print usage
    Help,
    /// Leave the loop
    Quit,
}

/// Reasons a line could not be turned into a [`Command`]
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command word is not recognised
    #[error("Unknown command {0:?} (try `help`)")]
    Unknown(String),

    /// A command that needs an argument got none
    #[error("`{0}` needs an argument")]
    MissingArgument(String),

    /// `rm` was given something other than a list position
    #[error("Invalid index {0:?}: expected a non-negative integer")]
    InvalidIndex(String),

    /// `json` payload did not decode to an action
    #[error("Invalid action JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Parse one input line
///
/// Blank lines parse to `Ok(None)`.
///
/// # Errors
///
/// Returns a [`CommandError`] describing why the line was rejected.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word {
        "set" => Command::Dispatch(vec![TodoAction::set_pending_input(rest)]),
        "add" if rest.is_empty() => Command::Dispatch(vec![TodoAction::add_item()]),
        "add" => Command::Dispatch(vec![
            TodoAction::set_pending_input(rest),
            TodoAction::add_item(),
        ]),
        "rm" | "delete" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument(word.to_string()));
            }
            let index = rest
                .parse()
                .map_err(|_| CommandError::InvalidIndex(rest.to_string()))?;
            Command::Dispatch(vec![TodoAction::remove_item(index)])
        }
        "init" => Command::Dispatch(vec![TodoAction::init_items(
            rest.split('|')
                .map(str::trim)
                .filter(|item| !item.is_empty()),
        )]),
        "json" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument(word.to_string()));
            }
            Command::Dispatch(vec![TodoAction::from_json(rest)?])
        }
        "list" | "ls" => Command::List,
        "history" => Command::History,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}
