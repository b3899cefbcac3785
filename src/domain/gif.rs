//! Search result domain model.
//!
//! A [`Gif`] is one entry of a provider page. The engine only keeps
//! [`Gif::image_url`]; `id` and `title` travel with the page for providers and
//! presenters that want them.

use serde::{Deserialize, Serialize};

/// A single search hit returned by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gif {
    pub id: String,
    pub title: String,
    pub image_url: String,
}

impl Gif {
    /// Creates a result entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use gifscout::Gif;
    ///
    /// let gif = Gif::new("1", "Funny Cat", "http://cat.gif");
    /// assert_eq!(gif.image_url, "http://cat.gif");
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
        }
    }
}

/// One page of provider results, in provider relevance order.
pub type ResultPage = Vec<Gif>;
