//! Plain text content extractor.

use docsift_core::{ContentExtractor, ExtractError, ExtractedContent, FormatMetadata};

/// Extractor for plain text files.
///
/// Bytes pass through as UTF-8; invalid sequences become U+FFFD.
pub struct TextExtractor;

impl TextExtractor {
    /// Create a new text extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for TextExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn extract_bytes(&self, data: &[u8]) -> Result<ExtractedContent, ExtractError> {
        let text = String::from_utf8_lossy(data).into_owned();
        let lines = text.split('\n').count();

        Ok(ExtractedContent {
            text,
            metadata: FormatMetadata::Txt { lines },
        })
    }
}
