//! # docsift-extract
//!
//! Format detection and text extraction for docsift.
//!
//! Every extractor is a stateless [`ContentExtractor`](docsift_core::ContentExtractor)
//! that turns a byte buffer into [`ExtractedContent`](docsift_core::ExtractedContent).
//!
//! ## Supported Formats
//!
//! | Extractor | Extensions | Metadata |
//! |-----------|------------|----------|
//! | [`PdfExtractor`] | `.pdf` | `pages` |
//! | [`DocxExtractor`] | `.docx` | `paragraphs` |
//! | [`HtmlExtractor`] | `.html`, `.htm` | `title` |
//! | [`XmlExtractor`] | `.xml` | `elements` |
//! | [`TextExtractor`] | `.txt` | `lines` |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use docsift_extract::{ExtractorRegistry, resolve_format};
//!
//! let registry = ExtractorRegistry::with_defaults();
//! let format = resolve_format(Some("pdf"), None, &bytes)?;
//! let content = registry.extract(format, &bytes)?;
//! println!("Extracted {} chars", content.text.chars().count());
//! ```
//!
//! ## PDF Text
//!
//! PDF content streams are reduced to text fragments and rebuilt by
//! [`reconstruct`](reconstruct::reconstruct), which distinguishes streams
//! drawing whole words from streams drawing single glyphs.
//! [`normalize_text`] finishes the job and is shared with the pipeline's
//! optional cleanup.

pub mod cleanup;
pub mod detect;
pub mod docx;
pub mod html;
pub mod pdf;
pub mod reconstruct;
pub mod registry;
pub mod text;
pub mod xml;

pub use cleanup::normalize_text;
pub use detect::{effective_extension, resolve_format};
pub use docx::DocxExtractor;
pub use html::HtmlExtractor;
pub use pdf::PdfExtractor;
pub use registry::ExtractorRegistry;
pub use text::TextExtractor;
pub use xml::XmlExtractor;
