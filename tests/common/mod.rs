//! Shared test doubles for engine scenarios.

#![allow(dead_code)]

use futures_util::future::BoxFuture;
use gifscout::{EngineSettings, Gif, ProviderError, ResultPage, SearchEngine, SearchProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Responder = dyn Fn(&str, usize, usize) -> Result<ResultPage, ProviderError> + Send + Sync;

/// One recorded provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub query: String,
    pub limit: usize,
    pub offset: usize,
}

/// Provider whose answers come from a closure, with optional per-request
/// latency. Every call is recorded when it starts.
pub struct ScriptedProvider {
    responder: Box<Responder>,
    delays: HashMap<(String, usize), Duration>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedProvider {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&str, usize, usize) -> Result<ResultPage, ProviderError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Holds the answer for `query` at `offset` back by `delay`.
    pub fn delay(mut self, query: &str, offset: usize, delay: Duration) -> Self {
        self.delays.insert((query.to_string(), offset), delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.calls().into_iter().map(|call| call.query).collect()
    }

    pub fn offsets(&self) -> Vec<usize> {
        self.calls().into_iter().map(|call| call.offset).collect()
    }
}

impl SearchProvider for ScriptedProvider {
    fn search<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
        offset: usize,
    ) -> BoxFuture<'a, Result<ResultPage, ProviderError>> {
        self.calls.lock().unwrap().push(Call {
            query: query.to_string(),
            limit,
            offset,
        });
        let delay = self.delays.get(&(query.to_string(), offset)).copied();
        let outcome = (self.responder)(query, limit, offset);

        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            outcome
        })
    }
}

/// Result URL for position `index` of `query`'s catalogue.
pub fn url(query: &str, index: usize) -> String {
    format!("http://media.test/{query}/{index}.gif")
}

/// Responder serving `total` results per query, sliced by offset and limit.
pub fn catalogue(
    total: usize,
) -> impl Fn(&str, usize, usize) -> Result<ResultPage, ProviderError> + Send + Sync + 'static {
    move |query, limit, offset| {
        Ok((offset..total.min(offset + limit))
            .map(|i| Gif::new(i.to_string(), format!("{query} {i}"), url(query, i)))
            .collect())
    }
}

pub fn engine(provider: &Arc<ScriptedProvider>, page_size: usize) -> SearchEngine {
    SearchEngine::new(
        Arc::clone(provider) as Arc<dyn SearchProvider>,
        EngineSettings {
            page_size,
            debounce: Duration::from_millis(1500),
        },
    )
}

/// Runs `settle` with a deadline; `None` means nothing settled in time.
pub async fn settle_within(
    engine: &mut SearchEngine,
    limit: Duration,
) -> Option<Arc<gifscout::SearchState>> {
    tokio::time::timeout(limit, engine.settle()).await.ok()
}
