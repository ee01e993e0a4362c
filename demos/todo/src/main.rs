//! Terminal front end for the todo list.
//!
//! Reads one command per line from stdin, dispatches the matching actions,
//! and re-renders the list after every accepted action.

use anyhow::Context;
use redux_todo_runtime::metrics::describe_metrics;
use std::sync::Arc;
use todo::view::{self, Command, TerminalView};
use todo::{TodoAction, TodoConfig, TodoStore, build_store};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    // Initialize tracing (stderr, so it does not interleave with the list on stdout)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo=info,redux_todo_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = TodoConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        store = %config.store_name,
        history_capacity = config.history_capacity,
        seed = config.seed,
        "Starting todo list"
    );
    describe_metrics();

    let store = Arc::new(build_store(&config));
    store.subscribe(TerminalView::new(std::io::stdout()));

    println!("=== Todo List ===  (type `help` for commands)\n");
    print!("{}", view::render(&store.get_state()));

    if let Some(load) = config.initial_load.clone() {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            tokio::time::sleep(load.delay).await;
            tracing::info!(items = load.items.len(), "Initial load finished");
            if let Err(error) = store.dispatch(TodoAction::init_items(load.items)) {
                tracing::warn!(%error, "Initial load rejected");
            }
        });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let command = match view::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(error) => {
                tracing::debug!(%error, line = %line, "Unparseable command");
                eprintln!("{error}");
                continue;
            }
        };

        match command {
            Command::Dispatch(actions) => dispatch_all(&store, actions),
            Command::List => print!("{}", view::render(&store.get_state())),
            Command::History => print_history(&store)?,
            Command::Help => print!("{}", view::HELP),
            Command::Quit => break,
        }
    }

    tracing::info!(accepted = store.accepted_count(), "Shutting down");
    Ok(())
}

/// Dispatch actions in order, stopping at the first rejection
fn dispatch_all(store: &TodoStore, actions: Vec<TodoAction>) {
    for action in actions {
        if let Err(error) = store.dispatch(action) {
            eprintln!("{error}");
            return;
        }
    }
}

fn print_history(store: &TodoStore) -> anyhow::Result<()> {
    let history = store.history();
    if history.is_empty() {
        println!("  (no recorded actions)");
    }
    for entry in history {
        println!("  {}", serde_json::to_string(&entry).context("Failed to encode history entry")?);
    }
    Ok(())
}
