//! # docsift-pipeline
//!
//! End-to-end document extraction for docsift.
//!
//! ```text
//! DocumentReference → SourceResolver → resolve_format → ExtractorRegistry → post_process
//!                                                                               ↓
//!                                                                       ExtractionOutput
//! ```
//!
//! Resolution is async; extraction is CPU-bound and runs on a blocking
//! thread. The [`ExtractionPipeline`] is shared behind an `Arc` and holds no
//! mutable state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docsift_core::{DocumentReference, ExtractionOptions, FetchConfig};
//! use docsift_pipeline::ExtractionPipeline;
//!
//! let pipeline = ExtractionPipeline::from_fetch_config(FetchConfig::default())?;
//! let reference = DocumentReference {
//!     src: Some("data:text/plain;base64,aGVsbG8gd29ybGQ=".to_string()),
//!     ..Default::default()
//! };
//! let output = pipeline.extract(&reference, &ExtractionOptions::default()).await?;
//! assert_eq!(output.text, "hello world");
//! ```

pub mod pipeline;
pub mod postprocess;

pub use pipeline::ExtractionPipeline;
pub use postprocess::{ELLIPSIS, build_output, post_process, truncate, word_count};
