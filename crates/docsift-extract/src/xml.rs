//! XML content extractor.

use docsift_core::{ContentExtractor, ExtractError, ExtractedContent, FormatMetadata};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

/// Extractor for generic XML.
///
/// Character data is trimmed and each non-empty piece followed by a space;
/// markup is dropped. Start and self-closing elements are counted.
pub struct XmlExtractor;

impl XmlExtractor {
    /// Create a new XML extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for XmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for XmlExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["xml"]
    }

    fn extract_bytes(&self, data: &[u8]) -> Result<ExtractedContent, ExtractError> {
        let mut reader = Reader::from_reader(data);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        let mut text = String::new();
        let mut elements = 0usize;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(_) | Event::Empty(_)) => elements += 1,
                Ok(Event::Text(e)) => {
                    let piece = e
                        .unescape()
                        .map_err(|err| ExtractError::MalformedContent(err.to_string()))?;
                    push_piece(&mut text, &piece);
                }
                Ok(Event::CData(e)) => {
                    push_piece(&mut text, &String::from_utf8_lossy(&e));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ExtractError::MalformedContent(format!(
                        "XML at byte {}: {e}",
                        reader.buffer_position()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(ExtractedContent {
            text,
            metadata: FormatMetadata::Xml { elements },
        })
    }
}

fn push_piece(text: &mut String, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        text.push_str(piece);
        text.push(' ');
    }
}
