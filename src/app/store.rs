//! Ordered, append-only result collection.
//!
//! [`ResultStore`] owns the reset/append rules so the engine's page handling
//! stays declarative. It never deduplicates or reorders: order and duplicates
//! are whatever the provider returned.

use std::sync::Arc;

/// Append-only list of result URLs with a cached shared view.
///
/// The view handed out by [`ResultStore::snapshot`] is rebuilt only when the
/// contents change, so snapshots that don't touch results share one
/// allocation.
#[derive(Debug, Clone)]
pub struct ResultStore {
    items: Vec<String>,
    view: Arc<[String]>,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            view: Arc::from(Vec::<String>::new()),
        }
    }
}

impl ResultStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents with `items`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gifscout::app::ResultStore;
    ///
    /// let mut store = ResultStore::new();
    /// store.append(["a".to_string()]);
    /// store.reset(["b".to_string(), "b".to_string()]);
    /// assert_eq!(store.as_slice(), ["b", "b"]);
    /// ```
    pub fn reset<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.items.clear();
        self.items.extend(items);
        self.refresh_view();
    }

    /// Appends `items` after the existing contents.
    ///
    /// Appending nothing leaves the store and its view untouched.
    pub fn append<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = String>,
    {
        let before = self.items.len();
        self.items.extend(items);
        if self.items.len() != before {
            self.refresh_view();
        }
    }

    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.refresh_view();
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Shared read-only view of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[String]> {
        Arc::clone(&self.view)
    }

    fn refresh_view(&mut self) {
        self.view = Arc::from(self.items.as_slice());
    }
}
