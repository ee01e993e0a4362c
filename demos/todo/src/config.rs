//! Configuration for the todo demo.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file in the working directory is honoured by the binary.

use crate::types::TodoState;
use redux_todo_runtime::StoreConfig;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to something that does not parse
    #[error("Invalid value {value:?} for {key}: expected {expected}")]
    InvalidValue {
        /// Environment variable name
        key: &'static str,
        /// The raw value found
        value: String,
        /// What a valid value looks like
        expected: &'static str,
    },
}

/// List contents loaded after startup, mimicking a slow backend fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialLoad {
    /// How long to wait before dispatching `InitItems`
    pub delay: Duration,
    /// Items to load
    pub items: Vec<String>,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
    /// Store label for logs and metrics (`TODO_STORE_NAME`, default `todo`)
    pub store_name: String,
    /// Accepted actions kept for `history` (`TODO_HISTORY_CAPACITY`, default 64)
    pub history_capacity: usize,
    /// Start from the two seed items (`TODO_SEED`, default true)
    pub seed: bool,
    /// Delayed `InitItems` (`TODO_INITIAL_ITEMS`, `|`-separated, plus
    /// `TODO_INITIAL_LOAD_DELAY_MS`, default 0)
    pub initial_load: Option<InitialLoad>,
}

impl Default for TodoConfig {
    fn default() -> Self {
        Self {
            store_name: "todo".to_string(),
            history_capacity: 64,
            seed: true,
            initial_load: None,
        }
    }
}

impl TodoConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric or boolean variable
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`TodoConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store_name = lookup("TODO_STORE_NAME").unwrap_or(defaults.store_name);

        let history_capacity = match lookup("TODO_HISTORY_CAPACITY") {
            Some(value) => parse_number("TODO_HISTORY_CAPACITY", value)?,
            None => defaults.history_capacity,
        };

        let seed = match lookup("TODO_SEED") {
            Some(value) => parse_bool("TODO_SEED", value)?,
            None => defaults.seed,
        };

        let delay_ms: u64 = match lookup("TODO_INITIAL_LOAD_DELAY_MS") {
            Some(value) => parse_number("TODO_INITIAL_LOAD_DELAY_MS", value)?,
            None => 0,
        };

        let initial_load = lookup("TODO_INITIAL_ITEMS").map(|raw| InitialLoad {
            delay: Duration::from_millis(delay_ms),
            items: raw
                .split('|')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        });

        Ok(Self {
            store_name,
            history_capacity,
            seed,
            initial_load,
        })
    }

    /// Store configuration derived from this config
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.store_name.clone(), self.history_capacity)
    }

    /// Snapshot the store starts from
    #[must_use]
    pub fn initial_state(&self) -> TodoState {
        if self.seed {
            TodoState::default()
        } else {
            TodoState::empty()
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value,
        expected: "a non-negative integer",
    })
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value,
            expected: "true or false",
        }),
    }
}
