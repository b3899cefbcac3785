//! Domain layer for gifscout.
//!
//! Core types shared by every other layer, independent of the HTTP transport,
//! the async runtime and the terminal front end. Conversions from transport
//! errors live with the provider that produces them.
//!
//! # Organization
//!
//! - [`error`]: crate and transport error types
//! - [`failure`]: the classified failure taxonomy shown to presenters
//! - [`gif`]: search result model
//!
//! # Examples
//!
//! ```
//! use gifscout::domain::{ErrorKind, Gif, ProviderError};
//!
//! let page = vec![Gif::new("1", "Cat", "http://cat.gif")];
//! assert_eq!(page.len(), 1);
//! assert_eq!(ErrorKind::classify(&ProviderError::Connect("offline".into())), ErrorKind::NetworkError);
//! ```

pub mod error;
pub mod failure;
pub mod gif;

pub use error::{GifscoutError, ProviderError, Result};
pub use failure::ErrorKind;
pub use gif::{Gif, ResultPage};
