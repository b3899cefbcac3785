//! Presentation layer.
//!
//! Snapshots published by the engine are turned into view models and handed
//! to a presenter:
//!
//! ```text
//! SearchState → compute_viewmodel → SearchViewModel → StatePresenter
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: display-ready types and user-facing messages
//! - [`renderer`]: presenters and the snapshot forwarding loop

pub mod renderer;
pub mod viewmodel;

pub use renderer::{drive_presenter, StatePresenter, TerminalPresenter};
pub use viewmodel::{
    compute_viewmodel, error_message, DisplayItem, EmptyState, HeaderInfo, SearchViewModel,
    StatusLine,
};
