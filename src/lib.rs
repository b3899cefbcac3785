//! gifscout: incremental GIF search over the GIPHY API.
//!
//! gifscout turns a stream of keystrokes into paginated search requests:
//! - Debounced fresh searches, with stale requests cancelled or discarded
//! - Offset pagination with an accurate "more results available" flag
//! - Classified failures (no results, timeout, network, server, unknown)
//! - Immutable state snapshots pushed to a presenter
//! - The last committed session persisted across restarts

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Single owner
//! │  - Intent handling                                  │
//! │  - Debounce, cancellation, pagination               │
//! │  - Snapshot publication                             │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Provider Layer│
//! │ (ui/)         │   │ (storage/)    │   │ (provider/)   │
//! │ - View models │   │ - JSON I/O    │   │ - GIPHY HTTP  │
//! │ - Presenters  │   │ - Session     │   │ - Wire models │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory (infrastructure/)                 │
//! │  - Errors and failure taxonomy (domain/)            │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! A TOML file passed with `--config`:
//!
//! ```toml
//! api_key = "..."
//! page_size = 50
//! debounce_ms = 1500
//! request_timeout_secs = 10
//! trace_level = "debug"
//! data_dir = "~/.local/share/gifscout"
//! ```
//!
//! The api key may also come from `GIPHY_API_KEY`.
//!
//! # Examples
//!
//! ```no_run
//! use gifscout::{Config, EngineSettings, GiphyProvider, SearchEngine};
//! use std::sync::Arc;
//!
//! # async fn demo() -> gifscout::Result<()> {
//! let config = Config::default().with_env();
//! let provider = Arc::new(GiphyProvider::from_config(&config)?);
//! let mut engine = SearchEngine::new(provider, EngineSettings::from(&config));
//!
//! engine.set_query("cats");
//! let state = engine.settle().await;
//! println!("{} results", state.results.len());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod provider;
pub mod storage;
pub mod ui;

pub use app::{handle_event, EngineSettings, Event, SearchEngine, SearchState};
pub use domain::{ErrorKind, Gif, GifscoutError, ProviderError, Result, ResultPage};
pub use provider::{GiphyProvider, SearchProvider};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no api key is configured.
pub const API_KEY_ENV: &str = "GIPHY_API_KEY";

/// Session file name inside the data directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Runtime configuration.
///
/// Built from a TOML file or a string map, then overridden by command-line
/// flags in `main.rs`.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// GIPHY api key. Required by [`GiphyProvider`].
    pub api_key: Option<String>,

    /// Search endpoint URL. Default: [`provider::DEFAULT_ENDPOINT`]
    pub endpoint: String,

    /// Results per page. Default: 50
    pub page_size: usize,

    /// Quiet period before a fresh search is sent. Default: 1500
    pub debounce_ms: u64,

    /// Per-request timeout. Default: 10
    pub request_timeout_secs: u64,

    /// Log filter directive such as `debug` or `gifscout=trace`.
    /// Default: `"info"`
    pub trace_level: Option<String>,

    /// Overrides the platform data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: provider::DEFAULT_ENDPOINT.to_string(),
            page_size: app::DEFAULT_PAGE_SIZE,
            debounce_ms: 1500,
            request_timeout_secs: 10,
            trace_level: None,
            data_dir: None,
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("page_size", &self.page_size)
            .field("debounce_ms", &self.debounce_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("trace_level", &self.trace_level)
            .field("data_dir", &self.data_dir)
            .finish()
    }
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// # Parsing Rules
    ///
    /// - `api_key`, `endpoint`, `trace_level`: taken as-is, blank values ignored
    /// - `page_size`, `debounce_ms`, `request_timeout_secs`: parsed as integers,
    ///   falling back to the default on parse error
    /// - `data_dir`: leading `~` expanded
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use gifscout::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("page_size".to_string(), "25".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.page_size, 25);
    /// assert_eq!(config.debounce_ms, 1500);
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();

        let text = |key: &str| {
            config
                .get(key)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(String::from)
        };

        Self {
            api_key: text("api_key"),
            endpoint: text("endpoint").unwrap_or(defaults.endpoint),
            page_size: parse_or(config, "page_size", defaults.page_size),
            debounce_ms: parse_or(config, "debounce_ms", defaults.debounce_ms),
            request_timeout_secs: parse_or(
                config,
                "request_timeout_secs",
                defaults.request_timeout_secs,
            ),
            trace_level: text("trace_level"),
            data_dir: text("data_dir").map(|dir| infrastructure::expand_tilde(&dir)),
        }
    }

    /// Loads configuration from a TOML file of top-level keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let table: toml::Table = contents
            .parse()
            .map_err(|e| GifscoutError::Config(format!("invalid config file: {e}")))?;

        let map = table
            .into_iter()
            .map(|(key, value)| {
                let value = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, value)
            })
            .collect::<BTreeMap<_, _>>();

        tracing::debug!(path = ?path, keys = map.len(), "loaded config file");
        Ok(Self::from_map(&map))
    }

    /// Fills a missing api key from `GIPHY_API_KEY`.
    #[must_use]
    pub fn with_env(self) -> Self {
        self.with_env_key(std::env::var(API_KEY_ENV).ok())
    }

    fn with_env_key(mut self, env_key: Option<String>) -> Self {
        if self.api_key.is_none() {
            self.api_key = env_key.filter(|key| !key.trim().is_empty());
        }
        self
    }

    /// Checks values that have no usable fallback.
    ///
    /// # Errors
    ///
    /// Returns [`GifscoutError::Config`] if `page_size` is zero or the
    /// endpoint is blank.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(GifscoutError::Config(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self.endpoint.trim().is_empty() {
            return Err(GifscoutError::Config("endpoint must not be empty".to_string()));
        }
        Ok(())
    }

    /// Directory holding the session and log files.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(infrastructure::get_data_dir)
    }

    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.data_dir().join(SESSION_FILE_NAME)
    }
}

fn parse_or<T>(config: &BTreeMap<String, String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match config.get(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::debug!(key, value = %raw, "invalid number in config, using default");
            default
        }),
    }
}
