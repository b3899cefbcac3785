//! Failure taxonomy surfaced on the published search state.
//!
//! [`ErrorKind`] is data, not an exception: the engine converts every provider
//! failure into one of these variants and stores it in
//! [`SearchState::error`](crate::app::SearchState::error).

use super::error::ProviderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP status codes reported as [`ErrorKind::ServerError`].
///
/// Other client and server statuses fall through to [`ErrorKind::Unknown`].
pub const RECOGNIZED_SERVER_STATUSES: [u16; 3] = [429, 500, 503];

/// Classified outcome of a search that did not produce results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// A fresh search succeeded with zero items.
    NoResults,
    /// The transport gave up waiting for the provider.
    Timeout,
    /// The provider host could not be reached.
    NetworkError,
    /// The provider answered with a recognized error status.
    ServerError(u16),
    /// Anything not otherwise classified. The message is for diagnostics only.
    Unknown(String),
}

impl ErrorKind {
    /// Classifies a provider failure.
    ///
    /// The status code is read from [`ProviderError::Status`] directly; error
    /// messages are never inspected.
    ///
    /// # Examples
    ///
    /// ```
    /// use gifscout::{ErrorKind, ProviderError};
    ///
    /// let throttled = ProviderError::Status { code: 429, message: "Too Many Requests".into() };
    /// assert_eq!(ErrorKind::classify(&throttled), ErrorKind::ServerError(429));
    ///
    /// let teapot = ProviderError::Status { code: 418, message: "I'm a teapot".into() };
    /// assert!(matches!(ErrorKind::classify(&teapot), ErrorKind::Unknown(_)));
    /// ```
    #[must_use]
    pub fn classify(error: &ProviderError) -> Self {
        match error {
            ProviderError::Timeout(_) => Self::Timeout,
            ProviderError::Connect(_) => Self::NetworkError,
            ProviderError::Status { code, .. } if RECOGNIZED_SERVER_STATUSES.contains(code) => {
                Self::ServerError(*code)
            }
            ProviderError::Status { .. }
            | ProviderError::Decode(_)
            | ProviderError::Other(_) => Self::Unknown(error.to_string()),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoResults => f.write_str("no results"),
            Self::Timeout => f.write_str("request timed out"),
            Self::NetworkError => f.write_str("network unavailable"),
            Self::ServerError(code) => write!(f, "server error ({code})"),
            Self::Unknown(message) => write!(f, "unexpected error: {message}"),
        }
    }
}
