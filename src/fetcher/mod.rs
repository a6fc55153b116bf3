//! Fetcher Module
//!
//! Sources that supply fresh values for keys, normally over the network.

mod func;
mod http;

use async_trait::async_trait;

use crate::error::FetchError;

pub use func::FnFetcher;
pub use http::HttpFetcher;

// == Fetcher ==
/// Retrieves a fresh value for a key from an external source.
#[async_trait]
pub trait Fetcher<K, V>: Send + Sync {
    async fn fetch(&self, key: &K) -> Result<V, FetchError>;
}
