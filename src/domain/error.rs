//! Error types for gifscout.
//!
//! Two layers of errors live here. [`GifscoutError`] is the crate-level error
//! returned by configuration, storage and client construction. [`ProviderError`]
//! is the transport-agnostic failure produced by a
//! [`SearchProvider`](crate::provider::SearchProvider); the engine never lets it
//! escape and instead classifies it into an
//! [`ErrorKind`](crate::domain::ErrorKind) on the published state.

use thiserror::Error;

/// The main error type for gifscout operations.
///
/// # Examples
///
/// ```
/// use gifscout::GifscoutError;
///
/// fn validate_page_size(size: usize) -> Result<(), GifscoutError> {
///     if size == 0 {
///         return Err(GifscoutError::Config("page_size must be at least 1".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_page_size(0).is_err());
/// ```
#[derive(Debug, Error)]
pub enum GifscoutError {
    /// Session storage could not be read, parsed or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(String),
}

/// Transport-level failure reported by a search provider.
///
/// Variants carry a human-readable message for diagnostics. The message is
/// never parsed; classification only looks at the variant and, for
/// [`ProviderError::Status`], the numeric status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The request did not complete within the transport's deadline.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The host could not be reached (DNS failure, refused connection, offline).
    #[error("connection failed: {0}")]
    Connect(String),

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP {code}: {message}")]
    Status {
        /// HTTP status code returned by the provider.
        code: u16,
        /// Reason phrase or response excerpt.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// A specialized `Result` type for gifscout operations.
pub type Result<T> = std::result::Result<T, GifscoutError>;
