//! Storage record models for session persistence.

use serde::{Deserialize, Serialize};

const fn default_can_load_more() -> bool {
    true
}

/// The last committed search session.
///
/// Written on teardown and used to seed a new engine on the next start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Query text at teardown.
    pub query: String,

    /// Result URLs belonging to `query`, in provider order.
    #[serde(default)]
    pub results: Vec<String>,

    /// Offset of the next page to request.
    #[serde(default)]
    pub offset: usize,

    /// Whether more pages may exist.
    #[serde(default = "default_can_load_more")]
    pub can_load_more: bool,

    /// Unix timestamp of when the record was taken.
    #[serde(default)]
    pub saved_at: i64,
}

impl SessionRecord {
    /// Creates a record stamped with the current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use gifscout::storage::SessionRecord;
    ///
    /// let record = SessionRecord::new("cats", vec!["http://cat.gif".into()], 50, true);
    /// assert_eq!(record.offset, 50);
    /// assert!(record.saved_at > 0);
    /// ```
    pub fn new(query: impl Into<String>, results: Vec<String>, offset: usize, can_load_more: bool) -> Self {
        Self {
            query: query.into(),
            results,
            offset,
            can_load_more,
            saved_at: chrono::Utc::now().timestamp(),
        }
    }
}
