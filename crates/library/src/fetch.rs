//! Getting raw response bodies from somewhere.

use async_trait::async_trait;
use banis_config::ApiConfig;
use banis_extract::models::DocumentType;
use exn::{OptionExt, ResultExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of raw (undecoded) document bodies.
///
/// One call is one attempt: implementations don't retry, and decoding is left
/// to the caller so that a failed decode can still log what was received.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, doc_type: DocumentType) -> Result<Vec<u8>>;
}

/// Shared handle to a [`Fetcher`], cloned into each spawned fetch task.
pub type FetcherHandle = Arc<dyn Fetcher>;

/// Fetches documents from the BaniDB HTTP API.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    api: ApiConfig,
}
impl HttpFetcher {
    pub fn new(api: ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .or_raise(|| ErrorKind::Network)?;
        Ok(Self::with_client(client, api))
    }

    pub fn with_client(client: reqwest::Client, api: ApiConfig) -> Self {
        Self { client, api }
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[instrument(skip(self), fields(url))]
    async fn fetch(&self, doc_type: DocumentType) -> Result<Vec<u8>> {
        let id = doc_type
            .numeric_id()
            .filter(|_| doc_type.is_fetchable())
            .ok_or_raise(|| ErrorKind::NotFetchable(doc_type))?;
        let url = self.api.bani_url(id);
        tracing::Span::current().record("url", url.as_str());
        tracing::debug!("Fetching document");

        let response = self.client.get(&url).send().await.or_raise(|| ErrorKind::Network)?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }
        let body = response.bytes().await.or_raise(|| ErrorKind::Network)?;
        tracing::debug!(bytes = body.len(), "Received response");
        Ok(body.to_vec())
    }
}

#[cfg(any(test, feature = "mock"))]
pub use self::mock::MockFetcher;

#[cfg(any(test, feature = "mock"))]
mod mock {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    /// In-memory [`Fetcher`] for testing.
    ///
    /// Types without a canned response fail with [`ErrorKind::Status`] 404,
    /// and every call is counted so tests can assert on network traffic.
    #[derive(Debug, Default)]
    pub struct MockFetcher {
        responses: RwLock<HashMap<DocumentType, std::result::Result<Vec<u8>, ErrorKind>>>,
        calls: RwLock<Vec<DocumentType>>,
    }
    impl MockFetcher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Serves `body` for `doc_type` from now on.
        pub async fn respond(&self, doc_type: DocumentType, body: impl Into<Vec<u8>>) {
            self.responses.write().await.insert(doc_type, Ok(body.into()));
        }

        /// Fails every request for `doc_type` with `kind` from now on.
        pub async fn fail(&self, doc_type: DocumentType, kind: ErrorKind) {
            self.responses.write().await.insert(doc_type, Err(kind));
        }

        /// Every type requested so far, in call order.
        pub async fn calls(&self) -> Vec<DocumentType> {
            self.calls.read().await.clone()
        }
    }

    #[async_trait]
    impl Fetcher for MockFetcher {
        async fn fetch(&self, doc_type: DocumentType) -> Result<Vec<u8>> {
            self.calls.write().await.push(doc_type);
            if !doc_type.is_fetchable() {
                exn::bail!(ErrorKind::NotFetchable(doc_type));
            }
            match self.responses.read().await.get(&doc_type) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(kind)) => Err(kind.clone().into()),
                None => exn::bail!(ErrorKind::Status(404)),
            }
        }
    }
}
