//! Application layer: the query engine and the state it publishes.
//!
//! # Architecture
//!
//! Data flows in one direction:
//!
//! ```text
//! Presenter intents → handle_event → SearchEngine ── spawn ──→ SearchProvider
//!                                        ↑                          │
//!                                        └──── completions ─────────┘
//!                                        │
//!                                        └─→ watch<Arc<SearchState>> → Presenter
//! ```
//!
//! # Modules
//!
//! - [`engine`]: debounce, cancellation, pagination and publication
//! - [`handler`]: presenter intents and their dispatch
//! - [`state`]: the published snapshot and the page cursor
//! - [`store`]: append-only result collection

pub mod engine;
pub mod handler;
pub mod state;
pub mod store;

pub use engine::{EngineSettings, SearchEngine, DEFAULT_DEBOUNCE, DEFAULT_PAGE_SIZE};
pub use handler::{handle_event, Event};
pub use state::{PageCursor, SearchState};
pub use store::ResultStore;
