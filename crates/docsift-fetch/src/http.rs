//! reqwest-backed [`HttpFetcher`].

use async_trait::async_trait;
use docsift_core::{FetchConfig, FetchError, HttpFetcher};
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use tracing::debug;

/// HTTP client shared by every extraction.
///
/// Each request is bounded by the configured timeout and redirect cap.
/// Credentials are only ever attached by [`HttpFetcher::get_authorized`].
pub struct HttpClient {
    client: Client,
    config: FetchConfig,
}

impl HttpClient {
    /// Build a client from `config`.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .redirect(Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Request {
                url: String::new(),
                reason: format!("HTTP client setup failed: {e}"),
            })?;

        Ok(Self { client, config })
    }

    /// The configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    async fn send(&self, url: &str, authorized: bool) -> Result<Vec<u8>, FetchError> {
        let mut request = self.client.get(url);
        if authorized {
            if let Some(token) = &self.config.auth_token {
                request = request.bearer_auth(token);
            }
        }

        debug!("GET {} (authorized: {})", url, authorized);
        let response = request.send().await.map_err(|e| self.map_error(url, &e))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::AuthenticationRequired(url.to_string()));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| self.map_error(url, &e))?;
        debug!("GET {} returned {} bytes", url, body.len());
        Ok(body.to_vec())
    }

    fn map_error(&self, url: &str, err: &reqwest::Error) -> FetchError {
        if err.is_timeout() {
            FetchError::NetworkTimeout {
                url: url.to_string(),
                timeout_secs: self.config.timeout_secs,
            }
        } else if err.is_redirect() {
            FetchError::TooManyRedirects {
                url: url.to_string(),
                limit: self.config.max_redirects,
            }
        } else {
            FetchError::Request {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

#[async_trait]
impl HttpFetcher for HttpClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.send(url, false).await
    }

    async fn get_authorized(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.send(url, true).await
    }
}
