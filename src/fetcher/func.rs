//! Fetcher backed by an async closure.

use std::future::Future;

use async_trait::async_trait;

use super::Fetcher;
use crate::error::FetchError;

// == Fn Fetcher ==
/// Adapts `Fn(K) -> impl Future<Output = Result<V, FetchError>>` into a [`Fetcher`].
///
/// ```ignore
/// let fetcher = FnFetcher::new(|id: String| async move { Ok(format!("profile {}", id)) });
/// ```
#[derive(Debug, Clone)]
pub struct FnFetcher<F> {
    f: F,
}

impl<F> FnFetcher<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<K, V, F, Fut> Fetcher<K, V> for FnFetcher<F>
where
    K: Clone + Send + Sync + 'static,
    V: Send + 'static,
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<V, FetchError>> + Send + 'static,
{
    async fn fetch(&self, key: &K) -> Result<V, FetchError> {
        (self.f)(key.clone()).await
    }
}
