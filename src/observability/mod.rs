//! File-based logging for the search session.
//!
//! `tracing` events and spans are formatted by `tracing-subscriber`'s fmt
//! layer and written to a rotating log file in the data directory:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → LogWriter → FileWriter → gifscout.log
//! ```
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! The api key is never recorded; request URLs are stripped from HTTP errors
//! before they are logged.
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`file_writer`]: rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::{FileWriter, LogWriter};
pub use init::{init_tracing, LOG_FILE_NAME};
