//! Remote search providers.
//!
//! # Modules
//!
//! - `backend`: the [`SearchProvider`] trait consumed by the engine
//! - `giphy`: HTTP implementation against the GIPHY search endpoint
//! - `models`: wire types for request parameters and response bodies

pub mod backend;
pub mod giphy;
pub mod models;

pub use backend::SearchProvider;
pub use giphy::{GiphyProvider, DEFAULT_ENDPOINT};
