//! In-memory fetcher for testing without a network.
//!
//! [`MemoryFetcher`] answers GET requests from a table of canned responses
//! and records every request it sees, so tests can assert both what was
//! fetched and what was never touched.

use async_trait::async_trait;
use docsift_core::{DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_SECS, FetchError, HttpFetcher};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A canned answer for one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryResponse {
    /// 200 with this body
    Body(Vec<u8>),
    /// Non-success HTTP status; 401 and 403 mean authentication is required
    Status(u16),
    /// The request times out
    Timeout,
    /// The redirect cap is exceeded
    RedirectLoop,
}

/// One recorded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRequest {
    pub url: String,
    /// Whether credentials were requested
    pub authorized: bool,
}

/// In-memory [`HttpFetcher`].
///
/// URLs without a canned response answer 404.
///
/// # Example
///
/// ```rust
/// use docsift_core::HttpFetcher;
/// use docsift_fetch::MemoryFetcher;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = MemoryFetcher::new().with_body("https://example.com/a.txt", "hi");
/// assert_eq!(fetcher.get("https://example.com/a.txt").await?, b"hi");
/// assert_eq!(fetcher.requested_urls().await.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    responses: HashMap<String, MemoryResponse>,
    requests: RwLock<Vec<MemoryRequest>>,
}

impl MemoryFetcher {
    /// Create a fetcher with no canned responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `url` with a 200 and `body`.
    #[must_use]
    pub fn with_body(self, url: &str, body: impl Into<Vec<u8>>) -> Self {
        self.with_response(url, MemoryResponse::Body(body.into()))
    }

    /// Answer `url` with `response`.
    #[must_use]
    pub fn with_response(mut self, url: &str, response: MemoryResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// All requests so far, in order.
    pub async fn requests(&self) -> Vec<MemoryRequest> {
        self.requests.read().await.clone()
    }

    /// URLs requested so far, in order.
    pub async fn requested_urls(&self) -> Vec<String> {
        self.requests
            .read()
            .await
            .iter()
            .map(|r| r.url.clone())
            .collect()
    }

    async fn respond(&self, url: &str, authorized: bool) -> Result<Vec<u8>, FetchError> {
        self.requests.write().await.push(MemoryRequest {
            url: url.to_string(),
            authorized,
        });

        match self.responses.get(url) {
            Some(MemoryResponse::Body(body)) => Ok(body.clone()),
            Some(MemoryResponse::Status(401 | 403)) => {
                Err(FetchError::AuthenticationRequired(url.to_string()))
            }
            Some(MemoryResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            Some(MemoryResponse::Timeout) => Err(FetchError::NetworkTimeout {
                url: url.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            }),
            Some(MemoryResponse::RedirectLoop) => Err(FetchError::TooManyRedirects {
                url: url.to_string(),
                limit: DEFAULT_MAX_REDIRECTS,
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[async_trait]
impl HttpFetcher for MemoryFetcher {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.respond(url, false).await
    }

    async fn get_authorized(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.respond(url, true).await
    }
}
