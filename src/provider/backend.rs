//! Search provider abstraction.
//!
//! The [`SearchProvider`] trait is the engine's only view of the remote API.
//! It is injected at construction so the HTTP client can be swapped for a test
//! double, and it is object safe so the engine can hold an
//! `Arc<dyn SearchProvider>`.

use crate::domain::{ProviderError, ResultPage};
use futures_util::future::BoxFuture;

/// A remote image-search capability.
///
/// Implementations must be cheap to call concurrently: the engine may have a
/// fresh search and a load-more continuation outstanding at the same time.
///
/// # Examples
///
/// ```
/// use futures_util::future::BoxFuture;
/// use gifscout::{Gif, ProviderError, ResultPage, SearchProvider};
///
/// struct Fixed;
///
/// impl SearchProvider for Fixed {
///     fn search<'a>(
///         &'a self,
///         query: &'a str,
///         _limit: usize,
///         _offset: usize,
///     ) -> BoxFuture<'a, Result<ResultPage, ProviderError>> {
///         Box::pin(async move { Ok(vec![Gif::new("1", query, "http://example.gif")]) })
///     }
/// }
/// ```
pub trait SearchProvider: Send + Sync {
    /// Fetches up to `limit` results for `query`, skipping the first `offset`.
    ///
    /// # Errors
    ///
    /// Returns a [`ProviderError`] on network, HTTP status or decoding failures.
    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
        offset: usize,
    ) -> BoxFuture<'a, Result<ResultPage, ProviderError>>;
}
