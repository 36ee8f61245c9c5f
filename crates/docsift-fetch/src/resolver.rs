//! Byte source resolution.
//!
//! A [`DocumentReference`] can carry its bytes in several places. The
//! resolver tries them in a fixed order and the first strategy that yields
//! a non-empty buffer wins:
//!
//! 1. `src` is an `http…` link to a public or shared document
//! 2. `src` is a `data:` URL
//! 3. `src` is bare base64
//! 4. the reference's download URL
//!
//! Failures of the first strategy are logged and skipped. If nothing else
//! resolves, an authentication or unsupported-link failure from it is
//! returned in place of `NoContentSource`. A malformed data URL, and any
//! failure of the last strategy, are returned to the caller.

use docsift_core::{DocumentReference, FetchError, HttpFetcher, RawContent};
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use crate::inline::{DATA_URL_PREFIX, decode_data_url, probe_base64};
use crate::providers::{Provider, fetch_from_provider, fetch_nonempty, fetch_public_document};

/// Resolves document references to raw bytes.
pub struct SourceResolver {
    fetcher: Arc<dyn HttpFetcher>,
}

impl SourceResolver {
    /// Create a resolver that sends requests through `fetcher`.
    #[must_use]
    pub fn new(fetcher: Arc<dyn HttpFetcher>) -> Self {
        Self { fetcher }
    }

    /// Resolve `reference` to its bytes.
    pub async fn resolve(&self, reference: &DocumentReference) -> Result<RawContent, FetchError> {
        let src = reference
            .src
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let mut link_failure = None;

        if let Some(src) = src {
            if src.starts_with("http") {
                match fetch_public_document(self.fetcher.as_ref(), src).await {
                    Ok(raw) => {
                        info!("Resolved {} from public link ({} bytes)", reference.label(), raw.len());
                        return Ok(raw);
                    }
                    Err(e) => {
                        warn!("Public link {} failed, trying other sources: {}", src, e);
                        if matches!(
                            e,
                            FetchError::AuthenticationRequired(_)
                                | FetchError::UnsupportedDocumentUrl(_)
                        ) {
                            link_failure = Some(e);
                        }
                    }
                }
            } else if src.starts_with(DATA_URL_PREFIX) {
                let data = decode_data_url(src)?;
                if !data.is_empty() {
                    debug!("Resolved {} from data URL", reference.label());
                    return Ok(RawContent::new(data));
                }
            } else if let Some(data) = probe_base64(src) {
                debug!("Resolved {} from inline base64", reference.label());
                return Ok(RawContent::new(data));
            }
        }

        if let Some(url) = reference.download_url() {
            let raw = self.download(url).await?;
            info!("Downloaded {} ({} bytes)", reference.label(), raw.len());
            return Ok(raw);
        }

        Err(link_failure.unwrap_or(FetchError::NoContentSource))
    }

    /// Download from a reference URL, routing provider hosts to their flow.
    async fn download(&self, url: &str) -> Result<RawContent, FetchError> {
        let hosted = Url::parse(url)
            .ok()
            .and_then(|parsed| Provider::from_url(&parsed).map(|provider| (parsed, provider)));

        match hosted {
            Some((parsed, provider)) => {
                fetch_from_provider(self.fetcher.as_ref(), provider, &parsed).await
            }
            None => fetch_nonempty(self.fetcher.as_ref(), url, true)
                .await
                .map(RawContent::new),
        }
    }
}
