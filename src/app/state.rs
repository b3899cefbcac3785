//! Published search state and the pagination cursor.
//!
//! [`SearchState`] is the single snapshot handed to presenters. Snapshots are
//! shared as `Arc<SearchState>` and never mutated after publication; the
//! engine builds the next snapshot from a clone of the current one.

use crate::domain::ErrorKind;
use std::sync::Arc;

/// Immutable snapshot of the search session.
///
/// `results` holds image URLs in provider order and is shared between
/// consecutive snapshots when it did not change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    /// Current search text, updated on every keystroke.
    pub query: String,

    /// Result URLs in provider order, duplicates preserved.
    pub results: Arc<[String]>,

    /// True while a debounce is pending or a fetch is in flight.
    pub is_loading: bool,

    /// False once a page shorter than the page size has been seen.
    pub can_load_more: bool,

    /// Classified outcome of the last request, if it did not succeed.
    pub error: Option<ErrorKind>,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Arc::from(Vec::<String>::new()),
            is_loading: false,
            can_load_more: true,
            error: None,
        }
    }
}

impl SearchState {
    /// Whether the query is empty or whitespace-only.
    ///
    /// # Examples
    ///
    /// ```
    /// use gifscout::SearchState;
    ///
    /// let state = SearchState { query: "  \t".to_string(), ..SearchState::default() };
    /// assert!(state.is_query_blank());
    /// ```
    #[must_use]
    pub fn is_query_blank(&self) -> bool {
        is_blank(&self.query)
    }
}

/// Offset into the provider's result list plus the fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    pub offset: usize,
    pub page_size: usize,
}

impl PageCursor {
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size,
        }
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Moves past the page that was requested at `requested_offset`.
    pub fn advance_from(&mut self, requested_offset: usize) {
        self.offset = requested_offset.saturating_add(self.page_size);
    }
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
