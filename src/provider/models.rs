//! Wire models for the GIPHY search endpoint.
//!
//! These types mirror the JSON exchanged with the API and are kept separate
//! from the domain [`Gif`] so field renames on the wire never leak into the
//! engine.

use crate::domain::{Gif, ResultPage};
use serde::{Deserialize, Serialize};

/// Query string of a search request.
///
/// Serialized in declaration order: `api_key`, `q`, `limit`, `offset`.
#[derive(Debug, Serialize)]
pub struct SearchParams<'a> {
    pub api_key: &'a str,
    pub q: &'a str,
    pub limit: usize,
    pub offset: usize,
}

/// Top-level response body: `{ "data": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<GifObject>,
}

/// A single GIF object as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct GifObject {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub images: Images,
}

/// Rendition set of a GIF object. Only the original rendition is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct Images {
    pub original: Rendition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Rendition {
    pub url: String,
}

impl From<GifObject> for Gif {
    fn from(object: GifObject) -> Self {
        Self {
            id: object.id,
            title: object.title,
            image_url: object.images.original.url,
        }
    }
}

impl SearchResponse {
    /// Converts the body into a domain page, preserving provider order.
    #[must_use]
    pub fn into_page(self) -> ResultPage {
        self.data.into_iter().map(Gif::from).collect()
    }
}
