//! Session store abstraction.
//!
//! The session is saved once on teardown and loaded once on the next start.

use crate::domain::error::Result;
use crate::storage::models::SessionRecord;

/// Persistence for the last search session.
///
/// # Examples
///
/// ```no_run
/// use gifscout::storage::{JsonSessionStore, SessionRecord, SessionStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonSessionStore::new(PathBuf::from("/tmp/gifscout/session.json"))?;
/// store.save(&SessionRecord::new("cats", vec![], 0, true))?;
/// assert!(store.load()?.is_some());
/// # Ok::<(), gifscout::GifscoutError>(())
/// ```
pub trait SessionStore: Send {
    /// Returns the saved session, or `None` if nothing was saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self) -> Result<Option<SessionRecord>>;

    /// Replaces the saved session.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, record: &SessionRecord) -> Result<()>;

    /// Forgets the saved session.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn clear(&mut self) -> Result<()>;

    /// Saves `record`, or forgets the saved session when its query is blank.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn persist(&mut self, record: &SessionRecord) -> Result<()> {
        if record.query.trim().is_empty() {
            tracing::debug!("blank session, clearing saved state");
            self.clear()
        } else {
            self.save(record)
        }
    }
}
