//! Error types for docsift.

use thiserror::Error;

/// Main error type for docsift operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Byte retrieval failed
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Format detection or extraction failed
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractError),

    /// The document reference itself is invalid
    #[error("reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),
}

/// Byte source resolution errors.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("no content source: every retrieval strategy came back empty")]
    NoContentSource,

    #[error("unsupported document url: {0}")]
    UnsupportedDocumentUrl(String),

    #[error("authentication required for {0}")]
    AuthenticationRequired(String),

    #[error("request to {url} timed out after {timeout_secs}s")]
    NetworkTimeout { url: String, timeout_secs: u64 },

    #[error("request to {url} exceeded {limit} redirects")]
    TooManyRedirects { url: String, limit: usize },

    #[error("empty content from {0}")]
    EmptyContent(String),

    #[error("invalid data url: {0}")]
    InvalidDataUrl(String),

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
}

/// Content extraction errors.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("missing document part: {0}")]
    MissingDocumentPart(String),

    #[error("malformed content: {0}")]
    MalformedContent(String),

    #[error("extraction failed: {0}")]
    Failed(String),
}

/// Document reference errors.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("invalid size value: {0}")]
    InvalidSize(String),
}

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;
