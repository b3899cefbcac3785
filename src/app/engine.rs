//! The search engine: debounce, cancellation, pagination and publication.
//!
//! [`SearchEngine`] is the single writer of [`SearchState`]. It is driven from
//! one coordinating context (its owner, or [`SearchEngine::run`]) and is not
//! shared between tasks. Remote work runs in spawned Tokio tasks that report
//! back through a channel; the engine applies those reports only after a
//! supersession check.
//!
//! # Lifecycle of a query
//!
//! ```text
//! set_query("cats")
//!   ├─ publish {query: "cats", is_loading: true}          (synchronous)
//!   └─ spawn: sleep(debounce) → provider.search(offset 0)
//!                                   │
//!                                   ▼ Completion { generation, .. }
//! settle()/run() ── generation == current? ── no  → discard silently
//!                                          └─ yes → apply page, publish
//! ```
//!
//! Every `set_query` bumps the generation and aborts the previous debounce or
//! fresh fetch. A load-more fetch is never aborted by typing; its completion
//! simply fails the generation check if a newer query has started.

use super::handler::{handle_event, Event};
use super::state::{is_blank, PageCursor, SearchState};
use super::store::ResultStore;
use crate::domain::{ErrorKind, ProviderError, ResultPage};
use crate::provider::SearchProvider;
use crate::storage::SessionRecord;
use crate::Config;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Default number of results requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Default quiet period between the last keystroke and the fetch.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1500);

/// Fixed per-engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Results requested per page. Must be at least 1.
    pub page_size: usize,
    /// Debounce window applied to fresh searches.
    pub debounce: Duration,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size.max(1),
            debounce: Duration::from_millis(config.debounce_ms),
        }
    }
}

/// Report sent by a fetch task when the provider call settles.
#[derive(Debug)]
struct Completion {
    generation: u64,
    offset: usize,
    reset_list: bool,
    outcome: Result<ResultPage, ProviderError>,
}

/// Debounced, paginated, cancellable query engine.
///
/// # Panics
///
/// Methods that start a fetch ([`set_query`](Self::set_query),
/// [`load_more`](Self::load_more), [`restore`](Self::restore)) spawn Tokio
/// tasks and must be called from within a Tokio runtime.
///
/// # Example
///
/// ```no_run
/// use gifscout::{Config, GiphyProvider, SearchEngine};
/// use std::sync::Arc;
///
/// # async fn demo() -> gifscout::Result<()> {
/// let config = Config { api_key: Some("key".into()), ..Config::default() };
/// let provider = Arc::new(GiphyProvider::from_config(&config)?);
/// let mut engine = SearchEngine::new(provider, (&config).into());
///
/// engine.set_query("cats");
/// let state = engine.settle().await;
/// println!("{} results", state.results.len());
/// # Ok(())
/// # }
/// ```
pub struct SearchEngine {
    provider: Arc<dyn SearchProvider>,
    settings: EngineSettings,
    store: ResultStore,
    cursor: PageCursor,
    state: Arc<SearchState>,
    /// Query whose outcome is currently held in `store`, if any.
    committed_query: Option<String>,
    generation: u64,
    fresh_task: Option<JoinHandle<()>>,
    load_more_task: Option<JoinHandle<()>>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    publisher: watch::Sender<Arc<SearchState>>,
}

impl SearchEngine {
    /// Creates an engine in the blank-query state.
    #[must_use]
    pub fn new(provider: Arc<dyn SearchProvider>, settings: EngineSettings) -> Self {
        let settings = EngineSettings {
            page_size: settings.page_size.max(1),
            ..settings
        };
        let state = Arc::new(SearchState::default());
        let (publisher, _) = watch::channel(Arc::clone(&state));
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            provider,
            settings,
            store: ResultStore::new(),
            cursor: PageCursor::new(settings.page_size),
            state,
            committed_query: None,
            generation: 0,
            fresh_task: None,
            load_more_task: None,
            completions_tx,
            completions_rx,
            publisher,
        }
    }

    /// Recreates an engine from a persisted session.
    ///
    /// The saved query, results and offset are published as the initial state.
    /// No fetch happens unless the query is non-blank and there are no saved
    /// results, in which case a fresh search starts immediately, without the
    /// debounce delay. A blank saved query restores the blank state.
    #[must_use]
    pub fn restore(
        provider: Arc<dyn SearchProvider>,
        settings: EngineSettings,
        record: SessionRecord,
    ) -> Self {
        let mut engine = Self::new(provider, settings);
        let _span = tracing::debug_span!(
            "restore_session",
            query_len = record.query.len(),
            result_count = record.results.len(),
            offset = record.offset
        )
        .entered();

        if is_blank(&record.query) {
            tracing::debug!("saved query is blank, starting fresh");
            engine.publish(SearchState {
                query: record.query,
                ..SearchState::default()
            });
            return engine;
        }

        if record.results.is_empty() {
            tracing::debug!("saved query has no results, fetching immediately");
            engine.publish(SearchState {
                query: record.query.clone(),
                is_loading: true,
                ..SearchState::default()
            });
            engine.fresh_task = Some(engine.spawn_fetch(record.query, 0, true, Duration::ZERO));
            return engine;
        }

        engine.store.reset(record.results);
        engine.cursor.offset = record.offset;
        engine.committed_query = Some(record.query.clone());
        engine.publish(SearchState {
            query: record.query,
            results: engine.store.snapshot(),
            is_loading: false,
            can_load_more: record.can_load_more,
            error: None,
        });
        engine
    }

    /// Current snapshot.
    #[must_use]
    pub fn state(&self) -> Arc<SearchState> {
        Arc::clone(&self.state)
    }

    /// Subscribes to the snapshot stream.
    ///
    /// The receiver starts at the current snapshot and observes every later
    /// publication (intermediate values may be skipped by a slow reader).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<SearchState>> {
        self.publisher.subscribe()
    }

    #[must_use]
    pub const fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Offset the next load-more request will use.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.cursor.offset
    }

    /// Replaces the query.
    ///
    /// The new query is published synchronously. Any pending debounce or
    /// in-flight fresh search is cancelled. A blank query resets the session
    /// immediately without touching the network; otherwise a fresh search is
    /// scheduled after the debounce window.
    pub fn set_query(&mut self, text: impl Into<String>) {
        let query = text.into();
        self.generation = self.generation.wrapping_add(1);
        let _span = tracing::debug_span!(
            "set_query",
            query_len = query.len(),
            generation = self.generation
        )
        .entered();

        if let Some(task) = self.fresh_task.take() {
            tracing::trace!("cancelling pending fresh search");
            task.abort();
        }
        self.committed_query = None;
        self.cursor.reset();

        let mut next = (*self.state).clone();
        next.query.clone_from(&query);
        next.error = None;
        next.can_load_more = true;

        if is_blank(&query) {
            self.store.clear();
            next.results = self.store.snapshot();
            next.is_loading = false;
            self.publish(next);
            tracing::debug!("blank query, session reset");
            return;
        }

        next.is_loading = true;
        self.publish(next);
        self.fresh_task = Some(self.spawn_fetch(query, 0, true, self.settings.debounce));
    }

    /// Requests the next page.
    ///
    /// Returns `false` without touching state when a request is already
    /// loading, the previous page was the last one, or the query is blank.
    pub fn load_more(&mut self) -> bool {
        let state = &self.state;
        if state.is_loading || !state.can_load_more || state.is_query_blank() {
            tracing::trace!(
                is_loading = state.is_loading,
                can_load_more = state.can_load_more,
                "load more ignored"
            );
            return false;
        }

        if let Some(stale) = self.load_more_task.take() {
            stale.abort();
        }

        let mut next = (**state).clone();
        next.is_loading = true;
        let query = next.query.clone();
        let offset = self.cursor.offset;
        self.publish(next);

        tracing::debug!(offset, generation = self.generation, "loading more results");
        self.load_more_task = Some(self.spawn_fetch(query, offset, false, Duration::ZERO));
        true
    }

    /// Waits until a fetch belonging to the current query settles, applies it,
    /// and returns the resulting snapshot.
    ///
    /// Superseded completions received on the way are discarded. If nothing is
    /// in flight this waits indefinitely; callers typically wrap it in
    /// `tokio::time::timeout`.
    pub async fn settle(&mut self) -> Arc<SearchState> {
        while let Some(completion) = self.completions_rx.recv().await {
            if self.apply(completion) {
                break;
            }
        }
        self.state()
    }

    /// Drives the engine from presenter intents until the intent channel
    /// closes, then cancels outstanding work and returns the session to
    /// persist.
    pub async fn run(mut self, mut intents: mpsc::Receiver<Event>) -> SessionRecord {
        tracing::debug!("search engine loop started");

        loop {
            tokio::select! {
                intent = intents.recv() => match intent {
                    Some(event) => {
                        handle_event(&mut self, event);
                    }
                    None => break,
                },
                Some(completion) = self.completions_rx.recv() => {
                    self.apply(completion);
                }
            }
        }

        self.cancel_all();
        tracing::debug!("search engine loop stopped");
        self.session_record()
    }

    /// The last committed `{query, results, offset}` triple.
    ///
    /// While the current query has not produced an outcome yet, the record
    /// carries the query with no results so that restoring it fetches again.
    #[must_use]
    pub fn session_record(&self) -> SessionRecord {
        let query = self.state.query.clone();
        if self.committed_query.as_deref() == Some(query.as_str()) {
            SessionRecord::new(
                query,
                self.store.as_slice().to_vec(),
                self.cursor.offset,
                self.state.can_load_more,
            )
        } else {
            SessionRecord::new(query, Vec::new(), 0, true)
        }
    }

    /// Aborts every outstanding task. Their results will never be published.
    pub fn cancel_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        for task in [self.fresh_task.take(), self.load_more_task.take()]
            .into_iter()
            .flatten()
        {
            task.abort();
        }
    }

    fn spawn_fetch(
        &self,
        query: String,
        offset: usize,
        reset_list: bool,
        delay: Duration,
    ) -> JoinHandle<()> {
        let provider = Arc::clone(&self.provider);
        let completions = self.completions_tx.clone();
        let generation = self.generation;
        let limit = self.settings.page_size;
        let span = tracing::debug_span!("perform_search", generation, offset, reset_list);

        tokio::spawn(
            async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }

                let outcome = provider.search(&query, limit, offset).await;

                let completion = Completion {
                    generation,
                    offset,
                    reset_list,
                    outcome,
                };
                if completions.send(completion).is_err() {
                    tracing::trace!("engine dropped before search completed");
                }
            }
            .instrument(span),
        )
    }

    /// Applies a completion if it still belongs to the current query.
    ///
    /// Returns `false` when the completion was superseded and discarded.
    fn apply(&mut self, completion: Completion) -> bool {
        let Completion {
            generation,
            offset,
            reset_list,
            outcome,
        } = completion;

        if generation != self.generation {
            tracing::debug!(
                stale_generation = generation,
                current_generation = self.generation,
                "discarding superseded search result"
            );
            return false;
        }

        let _span = tracing::debug_span!("apply_search_result", generation, offset, reset_list).entered();

        if reset_list {
            self.fresh_task = None;
        } else {
            self.load_more_task = None;
        }

        let mut next = (*self.state).clone();

        match outcome {
            Ok(page) if reset_list && page.is_empty() => {
                tracing::debug!("fresh search returned no results");
                self.store.clear();
                next.error = Some(ErrorKind::NoResults);
                next.can_load_more = false;
            }
            Ok(page) => {
                let page_len = page.len();
                let urls = page.into_iter().map(|gif| gif.image_url);
                if reset_list {
                    self.store.reset(urls);
                } else {
                    self.store.append(urls);
                }
                self.cursor.advance_from(offset);
                next.error = None;
                next.can_load_more = page_len >= self.settings.page_size;

                tracing::debug!(
                    page_len,
                    total = self.store.len(),
                    next_offset = self.cursor.offset,
                    can_load_more = next.can_load_more,
                    "page applied"
                );
            }
            Err(e) => {
                let kind = ErrorKind::classify(&e);
                tracing::debug!(error = %e, kind = %kind, "search failed");
                if reset_list {
                    self.store.clear();
                }
                next.error = Some(kind);
            }
        }

        if reset_list {
            self.committed_query = Some(next.query.clone());
        }
        next.results = self.store.snapshot();
        next.is_loading = false;
        self.publish(next);
        true
    }

    fn publish(&mut self, next: SearchState) {
        let snapshot = Arc::new(next);
        self.state = Arc::clone(&snapshot);
        self.publisher.send_replace(snapshot);
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

impl std::fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchEngine")
            .field("settings", &self.settings)
            .field("state", &self.state)
            .field("offset", &self.cursor.offset)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
