//! # docsift-core
//!
//! Core types and traits for docsift, a document content extraction engine.
//!
//! This crate provides the abstractions shared by every other docsift crate:
//!
//! - **Extraction**: [`ContentExtractor`] trait for turning bytes into text
//! - **Retrieval**: [`HttpFetcher`] trait for outbound HTTP
//! - **Formats**: [`DocumentFormat`] with extension parsing and magic-byte sniffing
//!
//! ## Architecture
//!
//! ```text
//! DocumentReference → SourceResolver → RawContent
//!                                         ↓
//!                     DocumentFormat → ContentExtractor → ExtractedContent
//!                                                               ↓
//!                                         post-processing → ExtractionOutput
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DocumentReference`] | Candidate document and its possible byte sources |
//! | [`RawContent`] | Resolved bytes plus an optional extension hint |
//! | [`ExtractedContent`] | Extractor text and [`FormatMetadata`] |
//! | [`ExtractionOptions`] | Cleanup, truncation and metadata switches |
//! | [`ExtractionOutput`] | The result envelope |
//! | [`FetchConfig`] | Timeout, redirect cap and credentials |
//!
//! ## Related Crates
//!
//! - `docsift-extract`: format detection and the per-format extractors
//! - `docsift-fetch`: byte source resolution and hosted-document providers
//! - `docsift-pipeline`: end-to-end extraction and post-processing

pub mod error;
pub mod format;
pub mod traits;
pub mod types;

pub use error::{Error, ExtractError, FetchError, ReferenceError, Result};
pub use format::{DocumentFormat, KNOWN_EXTENSIONS, SNIFF_WINDOW, normalize_extension};
pub use traits::*;
pub use types::*;
