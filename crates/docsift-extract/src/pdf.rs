//! PDF content extractor.
//!
//! Uses lopdf to walk each page's content stream and collect the strings
//! drawn by text-showing operators, then hands the fragments to the
//! [`reconstruct`](crate::reconstruct) module.

use docsift_core::{ContentExtractor, ExtractError, ExtractedContent, FormatMetadata};
use lopdf::content::Content;
use lopdf::{Document, Object};
use tracing::{debug, warn};

use crate::reconstruct::reconstruct;

/// `TJ` adjustments below this value (thousandths of text space) are word gaps.
pub const TJ_SPACE_THRESHOLD: f32 = -250.0;

/// Extractor for PDF files.
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for PdfExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn extract_bytes(&self, data: &[u8]) -> Result<ExtractedContent, ExtractError> {
        let doc = Document::load_mem(data)
            .map_err(|e| ExtractError::MalformedContent(format!("PDF load failed: {e}")))?;

        let pages = doc.get_pages();
        let mut fragments = Vec::new();

        for (page_num, page_id) in &pages {
            let raw = match doc.get_page_content(*page_id) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping page {}: unreadable content stream: {}", page_num, e);
                    continue;
                }
            };
            let content = match Content::decode(&raw) {
                Ok(content) => content,
                Err(e) => {
                    warn!("Skipping page {}: undecodable content stream: {}", page_num, e);
                    continue;
                }
            };

            let before = fragments.len();
            collect_fragments(&content, &mut fragments);
            debug!(
                "Page {}: {} text fragments",
                page_num,
                fragments.len() - before
            );
        }

        Ok(ExtractedContent {
            text: reconstruct(&fragments),
            metadata: FormatMetadata::Pdf { pages: pages.len() },
        })
    }
}

/// Push the non-empty strings drawn by `Tj`, `'`, `"` and `TJ`.
fn collect_fragments(content: &Content, fragments: &mut Vec<String>) {
    for op in &content.operations {
        let fragment = match op.operator.as_str() {
            "Tj" | "'" => op.operands.first().and_then(string_operand),
            "\"" => op.operands.get(2).and_then(string_operand),
            "TJ" => match op.operands.first() {
                Some(Object::Array(items)) => Some(join_tj_array(items)),
                _ => None,
            },
            _ => None,
        };

        if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
            fragments.push(fragment);
        }
    }
}

fn string_operand(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_pdf_string(bytes)),
        _ => None,
    }
}

fn join_tj_array(items: &[Object]) -> String {
    let mut text = String::new();
    for item in items {
        match item {
            Object::String(bytes, _) => text.push_str(&decode_pdf_string(bytes)),
            Object::Integer(_) | Object::Real(_) => {
                let gap = item.as_float().unwrap_or_default();
                if gap < TJ_SPACE_THRESHOLD && !text.is_empty() && !text.ends_with(' ') {
                    text.push(' ');
                }
            }
            _ => {}
        }
    }
    text
}

/// Decode a PDF string: UTF-16BE when it carries a byte-order mark,
/// otherwise one byte per character.
fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().copied().map(char::from).collect()
}
