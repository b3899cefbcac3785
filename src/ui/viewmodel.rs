//! View model types representing renderable search state.
//!
//! View models are computed from a [`SearchState`] snapshot and consumed by
//! the renderer. They contain no business logic, only display-ready data.

use crate::app::SearchState;
use crate::domain::ErrorKind;

/// Complete view model for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchViewModel {
    pub header: HeaderInfo,
    pub display_items: Vec<DisplayItem>,
    /// Shown instead of the list when there is nothing to list.
    pub empty_state: Option<EmptyState>,
    pub status: StatusLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub query: String,
    pub result_count: usize,
}

/// One result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// 1-based position in the result list.
    pub number: usize,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Single-line status shown under the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLine {
    /// Blank query, nothing requested.
    Idle,
    Loading,
    Error(String),
    /// More pages can be requested.
    MoreAvailable,
    EndOfResults,
}

impl StatusLine {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Idle => "type a query to search",
            Self::Loading => "loading...",
            Self::Error(message) => message,
            Self::MoreAvailable => "enter + for more",
            Self::EndOfResults => "end of results",
        }
    }
}

/// User-facing message for a failed search.
#[must_use]
pub fn error_message(kind: &ErrorKind, query: &str) -> String {
    match kind {
        ErrorKind::NoResults => format!("No GIFs found for \"{query}\""),
        ErrorKind::Timeout => "Request timed out. Please check your connection.".to_string(),
        ErrorKind::NetworkError => {
            "Network error. Please check your internet connection.".to_string()
        }
        ErrorKind::ServerError(code) => format!("Server error ({code}). Please try again later."),
        ErrorKind::Unknown(message) => format!("Error: {message}"),
    }
}

/// Builds the view model for a snapshot.
#[must_use]
pub fn compute_viewmodel(state: &SearchState) -> SearchViewModel {
    let display_items = state
        .results
        .iter()
        .enumerate()
        .map(|(i, url)| DisplayItem {
            number: i + 1,
            url: url.clone(),
        })
        .collect();

    let status = if state.is_loading {
        StatusLine::Loading
    } else if let Some(kind) = &state.error {
        StatusLine::Error(error_message(kind, &state.query))
    } else if state.is_query_blank() {
        StatusLine::Idle
    } else if state.can_load_more {
        StatusLine::MoreAvailable
    } else {
        StatusLine::EndOfResults
    };

    let empty_state = if state.results.is_empty() && !state.is_loading {
        compute_empty_state(state)
    } else {
        None
    };

    SearchViewModel {
        header: HeaderInfo {
            query: state.query.clone(),
            result_count: state.results.len(),
        },
        display_items,
        empty_state,
        status,
    }
}

fn compute_empty_state(state: &SearchState) -> Option<EmptyState> {
    if state.is_query_blank() {
        return Some(EmptyState {
            message: "Search GIPHY".to_string(),
            subtitle: "Type a query and press enter".to_string(),
        });
    }

    state.error.as_ref().map(|kind| EmptyState {
        message: error_message(kind, &state.query),
        subtitle: match kind {
            ErrorKind::NoResults => "Try a different query".to_string(),
            _ => "Enter + to retry".to_string(),
        },
    })
}
