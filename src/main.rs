//! Terminal front end.
//!
//! Reads one line per intent from stdin and prints result snapshots as they
//! are published:
//!
//! - any text: new query (an empty line clears the search)
//! - `+` or `:more`: request the next page
//! - `:quit` or end of input: exit and save the session
//!
//! # Lifecycle
//!
//! 1. Parse flags, load the config file, apply overrides
//! 2. Initialize tracing into the data directory
//! 3. Restore the last session unless `--no-restore`
//! 4. Run the engine and the presenter as tasks, feed them stdin
//! 5. Save the final session record, or clear it if the query is blank

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use gifscout::observability::init_tracing;
use gifscout::storage::{JsonSessionStore, SessionRecord, SessionStore};
use gifscout::ui::{drive_presenter, TerminalPresenter};
use gifscout::{Config, EngineSettings, Event, GiphyProvider, SearchEngine};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

/// Command-line arguments accepted by the `gifscout` binary.
#[derive(Parser, Debug)]
#[command(name = "gifscout", version, about = "Incremental GIF search in the terminal")]
struct Args {
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "GIFSCOUT_CONFIG",
        help = "TOML configuration file (default: none)"
    )]
    config: Option<PathBuf>,
    #[arg(
        long,
        value_name = "KEY",
        help = "GIPHY api key (default: config file, then GIPHY_API_KEY)"
    )]
    api_key: Option<String>,
    #[arg(long, value_name = "N", help = "Results per page (default: 50)")]
    page_size: Option<usize>,
    #[arg(
        long,
        value_name = "MS",
        help = "Quiet period before a search is sent (default: 1500)"
    )]
    debounce_ms: Option<u64>,
    #[arg(
        long,
        value_name = "LEVEL",
        help = "Log filter for the log file (default: info)"
    )]
    trace_level: Option<String>,
    #[arg(long, help = "Start with an empty session (default: disabled)")]
    no_restore: bool,
}

/// Stdin commands besides plain queries.
const MORE_COMMANDS: [&str; 2] = ["+", ":more"];
const QUIT_COMMAND: &str = ":quit";

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gifscout: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> gifscout::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_toml_file(path)?,
        None => Config::default(),
    };

    if let Some(key) = &args.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if let Some(debounce_ms) = args.debounce_ms {
        config.debounce_ms = debounce_ms;
    }
    if let Some(level) = &args.trace_level {
        config.trace_level = Some(level.clone());
    }

    let config = config.with_env();
    config.validate()?;
    Ok(config)
}

fn open_store(config: &Config) -> Option<JsonSessionStore> {
    match JsonSessionStore::new(config.session_path()) {
        Ok(store) => {
            tracing::debug!(path = ?store.path(), "session store opened");
            Some(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "session store unavailable, not persisting");
            None
        }
    }
}

fn restored_session(store: Option<&JsonSessionStore>, no_restore: bool) -> Option<SessionRecord> {
    if no_restore {
        return None;
    }
    match store?.load() {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(error = %e, "failed to load session");
            None
        }
    }
}

async fn run(args: Args) -> gifscout::Result<()> {
    let config = load_config(&args)?;
    init_tracing(&config);
    tracing::info!(config = ?config, "starting gifscout");

    let provider = Arc::new(GiphyProvider::from_config(&config)?);
    let settings = EngineSettings::from(&config);

    let mut store = open_store(&config);
    let engine = match restored_session(store.as_ref(), args.no_restore) {
        Some(record) => {
            tracing::debug!(query_len = record.query.len(), "restoring session");
            SearchEngine::restore(provider, settings, record)
        }
        None => SearchEngine::new(provider, settings),
    };

    let presenter = tokio::spawn(drive_presenter(
        engine.subscribe(),
        TerminalPresenter::stdout(),
    ));

    let (intents, intent_rx) = mpsc::channel(64);
    let engine_task = tokio::spawn(engine.run(intent_rx));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = line.trim();
        let event = if command == QUIT_COMMAND {
            break;
        } else if MORE_COMMANDS.contains(&command) {
            Event::LoadMore
        } else {
            Event::QueryChanged(line)
        };

        if intents.send(event).await.is_err() {
            tracing::warn!("engine stopped, leaving input loop");
            break;
        }
    }
    drop(intents);

    let record = match engine_task.await {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::error!(error = %e, "engine task failed");
            None
        }
    };

    if let Err(e) = presenter.await {
        tracing::error!(error = %e, "presenter task failed");
    }

    if let (Some(store), Some(record)) = (store.as_mut(), record) {
        if let Err(e) = store.persist(&record) {
            tracing::warn!(error = %e, "failed to save session");
        }
    }

    tracing::info!("gifscout stopped");
    Ok(())
}
