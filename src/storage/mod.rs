//! Storage layer for the persisted search session.
//!
//! Only the minimal state needed to survive a restart is stored: the last
//! committed query, its results and the next page offset.
//!
//! # Modules
//!
//! - `backend`: [`SessionStore`] trait abstraction
//! - `json`: JSON file implementation with atomic writes
//! - `models`: storage record types

pub mod backend;
pub mod json;
pub mod models;

pub use backend::SessionStore;
pub use json::JsonSessionStore;
pub use models::SessionRecord;
