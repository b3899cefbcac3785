//! JSON file-based session store.
//!
//! The session is kept in memory and written with an atomic replace
//! (write-to-temp + rename) so a crash never leaves a truncated file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "session": {
//!     "query": "cats",
//!     "results": ["https://media.giphy.com/media/abc/giphy.gif"],
//!     "offset": 50,
//!     "can_load_more": true,
//!     "saved_at": 1760000000
//!   }
//! }
//! ```

use crate::domain::error::{GifscoutError, Result};
use crate::storage::backend::SessionStore;
use crate::storage::models::SessionRecord;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    version: u32,

    #[serde(default)]
    session: Option<SessionRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            session: None,
        }
    }
}

/// JSON file session store.
///
/// `Send` but not `Sync`; owned by whoever drives the search session.
#[derive(Debug)]
pub struct JsonSessionStore {
    file_path: PathBuf,
    data: StorageData,
}

impl JsonSessionStore {
    /// Opens the store at `file_path`, creating parent directories.
    ///
    /// A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but is unreadable, is not valid JSON, or has a newer version.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "opening session store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no saved session");
            StorageData::default()
        };

        Ok(Self { file_path, data })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| GifscoutError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > STORAGE_VERSION {
            return Err(GifscoutError::Storage(format!(
                "unsupported session file version {}",
                data.version
            )));
        }

        tracing::debug!(
            version = data.version,
            has_session = data.session.is_some(),
            "loaded session file"
        );
        Ok(data)
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| GifscoutError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "session saved");
        Ok(())
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self) -> Result<Option<SessionRecord>> {
        Ok(self.data.session.clone())
    }

    fn save(&mut self, record: &SessionRecord) -> Result<()> {
        let _span = tracing::debug_span!(
            "json_save_session",
            query_len = record.query.len(),
            result_count = record.results.len()
        )
        .entered();

        self.data.version = STORAGE_VERSION;
        self.data.session = Some(record.clone());
        self.save_to_file()
    }

    fn clear(&mut self) -> Result<()> {
        if self.data.session.take().is_some() {
            self.save_to_file()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        SessionRecord::new(
            "cats",
            vec!["http://a.gif".to_string(), "http://a.gif".to_string()],
            50,
            true,
        )
    }

    #[test]
    fn saved_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let saved = record();

        let mut store = JsonSessionStore::new(path.clone()).unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.save(&saved).unwrap();
        drop(store);

        let reopened = JsonSessionStore::new(path).unwrap();
        assert_eq!(reopened.load().unwrap(), Some(saved));
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = JsonSessionStore::new(path.clone()).unwrap();
        store.save(&record()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn clear_forgets_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = JsonSessionStore::new(path.clone()).unwrap();
        store.save(&record()).unwrap();
        store.clear().unwrap();

        assert_eq!(JsonSessionStore::new(path).unwrap().load().unwrap(), None);
    }

    #[test]
    fn persisting_a_blank_session_clears_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = JsonSessionStore::new(path.clone()).unwrap();
        assert_eq!(store.path(), path.as_path());
        store.persist(&record()).unwrap();
        assert!(JsonSessionStore::new(path.clone()).unwrap().load().unwrap().is_some());

        store
            .persist(&SessionRecord::new("  ", Vec::new(), 0, true))
            .unwrap();
        assert_eq!(JsonSessionStore::new(path).unwrap().load().unwrap(), None);
    }

    #[test]
    fn older_files_default_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"version": 1, "session": {"query": "dogs"}}"#).unwrap();

        let session = JsonSessionStore::new(path).unwrap().load().unwrap().unwrap();

        assert_eq!(session.query, "dogs");
        assert!(session.results.is_empty());
        assert_eq!(session.offset, 0);
        assert!(session.can_load_more);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            JsonSessionStore::new(path),
            Err(GifscoutError::Storage(_))
        ));
    }

    #[test]
    fn newer_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"version": 99}"#).unwrap();

        assert!(matches!(
            JsonSessionStore::new(path),
            Err(GifscoutError::Storage(_))
        ));
    }
}
