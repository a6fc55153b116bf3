//! Fetcher that reads JSON documents from an HTTP upstream.

use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::Fetcher;
use crate::error::FetchError;

// == HTTP Fetcher ==
/// Fetches `GET {base_url}/{key}` and decodes the JSON body into `V`.
///
/// The key always becomes a single path segment: `/`, `?`, `#` and `%` in a
/// key are percent-encoded rather than read as URL syntax.
#[derive(Debug, Clone)]
pub struct HttpFetcher<V> {
    client: Client,
    base_url: Url,
    _value: PhantomData<fn() -> V>,
}

impl<V> HttpFetcher<V> {
    // == Constructor ==
    /// Creates a fetcher for `base_url` whose requests give up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Self::with_client(client, base_url)
    }

    /// Creates a fetcher sharing an existing client.
    ///
    /// Fails when `base_url` is not an absolute URL that can take a path.
    pub fn with_client(client: Client, base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            FetchError::Transport(format!("invalid upstream URL {}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(FetchError::Transport(format!(
                "upstream URL {} cannot take a path",
                base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            _value: PhantomData,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, key: &str) -> Result<Url, FetchError> {
        // "." and ".." would be dropped or resolved as path segments
        if matches!(key, "" | "." | "..") {
            return Err(FetchError::NotFound(key.to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                FetchError::Transport(format!(
                    "upstream URL {} cannot take a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(key);
        Ok(url)
    }
}

#[async_trait]
impl<V> Fetcher<String, V> for HttpFetcher<V>
where
    V: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, key: &String) -> Result<V, FetchError> {
        let url = self.url_for(key)?;
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(key.clone()));
        }
        if !status.is_success() {
            return Err(FetchError::Transport(format!(
                "{} responded with {}",
                url, status
            )));
        }

        response
            .json::<V>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}
