//! Presenters and the snapshot forwarding loop.
//!
//! A presenter receives every published [`SearchState`] and turns it into
//! output. [`TerminalPresenter`] prints plain text for a line-oriented
//! terminal; result rows already printed for the current query are not
//! printed again.

use crate::app::SearchState;
use crate::ui::viewmodel::{compute_viewmodel, SearchViewModel};
use std::io::{self, Write};
use std::sync::Arc;
use tokio::sync::watch;

/// Consumer of search state snapshots.
pub trait StatePresenter: Send {
    fn render(&mut self, state: &SearchState);
}

/// Plain-text presenter writing to any [`Write`] sink.
///
/// The listing restarts whenever the query changes or the results stop
/// extending what was already printed. After a query change, rows carried
/// over from the previous query stay hidden until the new query settles.
#[derive(Debug)]
pub struct TerminalPresenter<W: Write> {
    out: W,
    shown_query: Option<String>,
    shown_rows: Arc<[String]>,
    shown_status: Option<String>,
    awaiting_fresh: bool,
}

impl TerminalPresenter<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            shown_query: None,
            shown_rows: Arc::from(Vec::<String>::new()),
            shown_status: None,
            awaiting_fresh: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_snapshot(&mut self, state: &SearchState, vm: &SearchViewModel) -> io::Result<()> {
        let query_changed = self.shown_query.as_deref() != Some(state.query.as_str());
        if query_changed || !extends(&state.results, &self.shown_rows) {
            self.shown_query = Some(state.query.clone());
            self.shown_rows = Arc::from(Vec::<String>::new());
            self.shown_status = None;
            self.awaiting_fresh = state.is_loading;
            if !state.is_query_blank() {
                writeln!(self.out, "== {} ==", state.query)?;
            }
        } else if !state.is_loading {
            self.awaiting_fresh = false;
        }

        if let Some(empty) = &vm.empty_state {
            let line = format!("{} ({})", empty.message, empty.subtitle);
            self.write_status(line)?;
            return self.out.flush();
        }

        if !self.awaiting_fresh {
            for item in vm.display_items.iter().skip(self.shown_rows.len()) {
                writeln!(self.out, "{:>4}. {}", item.number, item.url)?;
            }
            self.shown_rows = Arc::clone(&state.results);
        }

        let status = format!("[{} results, {}]", self.shown_rows.len(), vm.status.text());
        self.write_status(status)?;
        self.out.flush()
    }

    fn write_status(&mut self, line: String) -> io::Result<()> {
        if self.shown_status.as_deref() != Some(line.as_str()) {
            writeln!(self.out, "{line}")?;
            self.shown_status = Some(line);
        }
        Ok(())
    }
}

/// Whether `current` starts with every row in `shown`.
fn extends(current: &Arc<[String]>, shown: &Arc<[String]>) -> bool {
    Arc::ptr_eq(current, shown)
        || (current.len() >= shown.len() && current[..shown.len()] == shown[..])
}

impl<W: Write + Send> StatePresenter for TerminalPresenter<W> {
    fn render(&mut self, state: &SearchState) {
        let vm = compute_viewmodel(state);
        if let Err(e) = self.render_snapshot(state, &vm) {
            tracing::warn!(error = %e, "failed to write to terminal");
        }
    }
}

/// Forwards every snapshot from `updates` to `presenter` until the engine
/// side of the channel is dropped, then hands the presenter back.
///
/// The current snapshot is rendered immediately.
pub async fn drive_presenter<P: StatePresenter>(
    mut updates: watch::Receiver<Arc<SearchState>>,
    mut presenter: P,
) -> P {
    let initial = Arc::clone(&updates.borrow_and_update());
    presenter.render(&initial);

    while updates.changed().await.is_ok() {
        let state = Arc::clone(&updates.borrow_and_update());
        presenter.render(&state);
    }

    tracing::debug!("state channel closed, presenter stopping");
    presenter
}
