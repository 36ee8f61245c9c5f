//! DOCX content extractor.
//!
//! A DOCX file is a ZIP package whose body lives in `word/document.xml`.
//! Text is collected from `<w:t>` nodes, concatenated per `<w:p>` paragraph.

use docsift_core::{ContentExtractor, ExtractError, ExtractedContent, FormatMetadata};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use std::io::{BufReader, Cursor};
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

/// Package entry holding the main document body.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Extractor for Word documents.
pub struct DocxExtractor;

impl DocxExtractor {
    /// Create a new DOCX extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for DocxExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn extract_bytes(&self, data: &[u8]) -> Result<ExtractedContent, ExtractError> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| ExtractError::MalformedContent(format!("invalid DOCX package: {e}")))?;

        let document = match archive.by_name(DOCUMENT_PART) {
            Ok(document) => document,
            Err(ZipError::FileNotFound) => {
                return Err(ExtractError::MissingDocumentPart(DOCUMENT_PART.to_string()));
            }
            Err(e) => {
                return Err(ExtractError::MalformedContent(format!(
                    "unreadable {DOCUMENT_PART}: {e}"
                )));
            }
        };

        let paragraphs = read_paragraphs(BufReader::new(document))?;
        debug!("DOCX: {} non-empty paragraphs", paragraphs.len());

        Ok(ExtractedContent {
            text: paragraphs.join("\n"),
            metadata: FormatMetadata::Docx {
                paragraphs: paragraphs.len(),
            },
        })
    }
}

/// Stream the document XML, returning paragraphs with visible text.
///
/// Paragraphs can nest (a text box inside a run holds its own `<w:p>`), so
/// open paragraphs are kept on a stack. Each is emitted when it closes,
/// which places a nested paragraph before the one containing it.
fn read_paragraphs<R: std::io::BufRead>(source: R) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(1024);
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"p" => {
                    if let Some(paragraph) = open.pop() {
                        if !paragraph.trim().is_empty() {
                            paragraphs.push(paragraph);
                        }
                    }
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Text(e)) if in_text => {
                let text = e.unescape().map_err(|err| {
                    ExtractError::MalformedContent(format!("bad text in {DOCUMENT_PART}: {err}"))
                })?;
                if let Some(paragraph) = open.last_mut() {
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::MalformedContent(format!(
                    "{DOCUMENT_PART} at byte {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
