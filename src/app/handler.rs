//! Presenter intents and their dispatch into the engine.
//!
//! Presenters never mutate [`SearchState`](super::SearchState); everything they
//! want to happen arrives here as an [`Event`]. This is the only inbound path
//! into the engine besides its two public operations.

use super::engine::SearchEngine;

/// An intent raised by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The search input changed to the given text.
    QueryChanged(String),

    /// The presenter wants the next page (e.g. the list was scrolled near its end).
    LoadMore,
}

/// Applies a presenter intent to the engine.
///
/// Returns `true` if a new snapshot was published as a direct result of the
/// event. Query changes always publish; load-more requests publish only when
/// they pass the engine's guard.
///
/// # Example
///
/// ```no_run
/// use gifscout::app::{handle_event, Event, SearchEngine};
/// # fn demo(engine: &mut SearchEngine) {
/// assert!(handle_event(engine, Event::QueryChanged("cats".into())));
/// // Still debouncing, so the request is ignored.
/// assert!(!handle_event(engine, Event::LoadMore));
/// # }
/// ```
pub fn handle_event(engine: &mut SearchEngine, event: Event) -> bool {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::QueryChanged(query) => {
            tracing::trace!(query = %query, "query changed");
            engine.set_query(query);
            true
        }
        Event::LoadMore => engine.load_more(),
    }
}
