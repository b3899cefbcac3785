//! HTTP provider backed by the GIPHY search endpoint.
//!
//! Requests are `GET {endpoint}?api_key=..&q=..&limit=..&offset=..`. Non-2xx
//! responses become [`ProviderError::Status`] carrying the real status code.
//! The API key is sent with every request and never logged.

use super::backend::SearchProvider;
use super::models::{SearchParams, SearchResponse};
use crate::domain::error::{GifscoutError, Result};
use crate::domain::{ProviderError, ResultPage};
use crate::Config;
use futures_util::future::BoxFuture;
use std::time::Duration;

/// Default search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.giphy.com/v1/gifs/search";

/// GIPHY search client.
#[derive(Clone)]
pub struct GiphyProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GiphyProvider {
    /// Builds a provider from configuration.
    ///
    /// The transport timeout comes from `request_timeout_secs`; when it elapses
    /// the call fails with [`ProviderError::Timeout`].
    ///
    /// # Errors
    ///
    /// Returns [`GifscoutError::Config`] if no api key is configured and
    /// [`GifscoutError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GifscoutError::Config("missing GIPHY api key".to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GifscoutError::Http(e.to_string()))?;

        Ok(Self::with_client(client, config.endpoint.clone(), api_key))
    }

    /// Wraps an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, endpoint: String, api_key: String) -> Self {
        Self {
            client,
            endpoint,
            api_key,
        }
    }

    /// Builds the search request without sending it.
    ///
    /// # Errors
    ///
    /// Fails if the configured endpoint is not a valid URL.
    pub fn build_request(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> std::result::Result<reqwest::Request, ProviderError> {
        let params = SearchParams {
            api_key: &self.api_key,
            q: query,
            limit,
            offset,
        };

        self.client
            .get(&self.endpoint)
            .query(&params)
            .build()
            .map_err(ProviderError::from)
    }

    async fn fetch(
        &self,
        query: &str,
        limit: usize,
        offset: usize,
    ) -> std::result::Result<ResultPage, ProviderError> {
        let request = self.build_request(query, limit, offset)?;

        tracing::debug!(query_len = query.len(), limit, offset, "sending search request");

        let response = self.client.execute(request).await?.error_for_status()?;
        let body: SearchResponse = response.json().await?;
        let page = body.into_page();

        tracing::debug!(page_len = page.len(), offset, "search response decoded");
        Ok(page)
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        // The request URL carries the api key.
        let error = error.without_url();
        let message = error.to_string();

        if error.is_timeout() {
            Self::Timeout(message)
        } else if let Some(status) = error.status() {
            Self::Status {
                code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .map_or(message, ToString::to_string),
            }
        } else if error.is_connect() {
            Self::Connect(message)
        } else if error.is_decode() {
            Self::Decode(message)
        } else {
            Self::Other(message)
        }
    }
}


impl SearchProvider for GiphyProvider {
    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
        offset: usize,
    ) -> BoxFuture<'a, std::result::Result<ResultPage, ProviderError>> {
        Box::pin(async move {
            let result = self.fetch(query, limit, offset).await;
            if let Err(e) = &result {
                tracing::warn!(error = %e, offset, "search request failed");
            }
            result
        })
    }
}

impl std::fmt::Debug for GiphyProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GiphyProvider")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GiphyProvider {
        GiphyProvider::with_client(
            reqwest::Client::new(),
            DEFAULT_ENDPOINT.to_string(),
            "test_key".to_string(),
        )
    }

    #[test]
    fn request_carries_exact_query_parameters() {
        let request = provider().build_request("funny cats", 50, 100).unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/v1/gifs/search");

        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("api_key".to_string(), "test_key".to_string()),
                ("q".to_string(), "funny cats".to_string()),
                ("limit".to_string(), "50".to_string()),
                ("offset".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn from_config_requires_api_key() {
        let config = Config {
            api_key: Some("   ".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            GiphyProvider::from_config(&config),
            Err(GifscoutError::Config(_))
        ));
    }

    #[test]
    fn invalid_endpoint_is_an_other_error_without_the_key() {
        let provider = GiphyProvider::with_client(
            reqwest::Client::new(),
            "http://[::1".to_string(),
            "test_key".to_string(),
        );

        let error = provider.build_request("cats", 50, 0).unwrap_err();

        assert!(matches!(error, ProviderError::Other(_)));
        assert!(!error.to_string().contains("test_key"));
    }

    #[test]
    fn debug_output_hides_api_key() {
        let rendered = format!("{:?}", provider());
        assert!(!rendered.contains("test_key"));
    }
}
