//! Concurrent polling of weather sources.
//!
//! One request per source per cycle, all in flight at once, joined before
//! anything downstream runs. A source that fails never takes the cycle down
//! with it: the failure goes to the diagnostics sink and the source
//! contributes a missing reading instead.

use crate::config::WeatherSource;
use crate::diagnostics::Diagnostics;
use crate::extract::extract;
use crate::models::SourceReading;
use anyhow::{Context, Result};
use futures::future::join_all;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// What can go wrong while fetching one source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or timed out.
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The body arrived but was not valid JSON.
    #[error("response body was not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),

    /// Transport-agnostic failure, for non-HTTP `Fetch` implementations.
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Network capability seam: fetch one source's response as a JSON value.
#[allow(async_fn_in_trait)]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, source: &WeatherSource) -> Result<Value, FetchError>;
}

/// HTTP implementation of [`Fetch`] backed by a shared `reqwest` client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds the client once with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, source: &WeatherSource) -> Result<Value, FetchError> {
        let mut request = self.client.get(&source.url).query(&source.params);
        for (key, value) in &source.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await.map_err(FetchError::Transport)?;

        // Some weather APIs serve JSON under odd content types; reqwest
        // parses the body without checking the declared type.
        response.json::<Value>().await.map_err(FetchError::Decode)
    }
}

/// Polls every source concurrently and returns exactly one reading per
/// source, in no particular order.
///
/// The `join_all` is the cycle's only synchronization point: nothing is
/// surfaced until every source has finished or failed.
pub async fn poll_sources<F: Fetch>(
    fetcher: &F,
    sources: &[WeatherSource],
    diagnostics: &dyn Diagnostics,
) -> Vec<SourceReading> {
    let polls = sources
        .iter()
        .map(|source| poll_one(fetcher, source, diagnostics));

    join_all(polls).await
}

/// Polls a single source, isolating its failure.
async fn poll_one<F: Fetch>(
    fetcher: &F,
    source: &WeatherSource,
    diagnostics: &dyn Diagnostics,
) -> SourceReading {
    match fetcher.fetch(source).await {
        Ok(body) => SourceReading::new(
            &source.name,
            extract(Some(&body), &source.result_keys),
        ),
        Err(error) => {
            diagnostics.source_failure(&source.name, &error);
            SourceReading::missing(&source.name)
        }
    }
}

/// Test double for [`Fetch`], shared with the checker's tests.
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::HashMap;

    /// Fake fetcher with canned responses keyed by source name; unknown
    /// sources fail.
    pub struct FakeFetcher {
        responses: HashMap<String, Value>,
    }

    impl FakeFetcher {
        pub fn new(responses: Vec<(&str, Value)>) -> Self {
            Self {
                responses: responses
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect(),
            }
        }
    }

    impl Fetch for FakeFetcher {
        async fn fetch(&self, source: &WeatherSource) -> Result<Value, FetchError> {
            self.responses
                .get(&source.name)
                .cloned()
                .ok_or_else(|| FetchError::Unavailable(format!("no response for {}", source.name)))
        }
    }
}
