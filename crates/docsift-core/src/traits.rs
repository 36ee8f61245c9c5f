//! Core traits for docsift components.
//!
//! - [`ContentExtractor`]: turn a byte buffer of one format into text
//! - [`HttpFetcher`]: perform an outbound GET and return the body
//!
//! Extractors are synchronous and CPU-bound; the pipeline runs them on a
//! blocking thread. Fetchers are async so the resolver can be driven by
//! a real HTTP client or by an in-memory double in tests.

use async_trait::async_trait;

use crate::error::{ExtractError, FetchError};
use crate::types::ExtractedContent;

// ============================================================================
// Content Extraction
// ============================================================================

/// Trait for extracting text from document bytes.
pub trait ContentExtractor: Send + Sync {
    /// Extensions this extractor handles, without dots.
    fn supported_extensions(&self) -> &[&str];

    /// Check if this extractor handles the given extension.
    fn can_extract(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }

    /// Extract text and metadata from a byte buffer.
    fn extract_bytes(&self, data: &[u8]) -> Result<ExtractedContent, ExtractError>;
}

// ============================================================================
// Retrieval
// ============================================================================

/// Trait for the outbound HTTP capability.
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// GET a URL and return the body after following redirects.
    async fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// GET with the configured credentials attached.
    ///
    /// Fetchers without credentials fall back to [`HttpFetcher::get`].
    async fn get_authorized(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.get(url).await
    }
}
