//! HTML content extractor.

use docsift_core::{ContentExtractor, ExtractError, ExtractedContent, FormatMetadata};
use scraper::{Html, Node, Selector};

/// Elements whose text is never shown to a reader.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style"];

/// Extractor for HTML pages.
///
/// Every visible text node is trimmed and followed by a single space, in
/// document order. The first `<title>` becomes metadata.
pub struct HtmlExtractor;

impl HtmlExtractor {
    /// Create a new HTML extractor.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for HtmlExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn extract_bytes(&self, data: &[u8]) -> Result<ExtractedContent, ExtractError> {
        let source = String::from_utf8_lossy(data);
        let doc = Html::parse_document(&source);

        let mut text = String::new();
        for node in doc.tree.root().descendants() {
            let Node::Text(fragment) = node.value() else {
                continue;
            };
            let fragment = fragment.trim();
            if fragment.is_empty() {
                continue;
            }
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            if hidden {
                continue;
            }
            text.push_str(fragment);
            text.push(' ');
        }

        Ok(ExtractedContent {
            text,
            metadata: FormatMetadata::Html {
                title: document_title(&doc),
            },
        })
    }
}

fn document_title(doc: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    doc.select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> ExtractedContent {
        HtmlExtractor::new().extract_bytes(html.as_bytes()).unwrap()
    }

    #[test]
    fn test_extracts_visible_text_in_order() {
        let content = extract("<html><body><h1>Title</h1><p>First  </p><p>  Second</p></body></html>");
        assert_eq!(content.text, "Title First Second ");
    }

    #[test]
    fn test_skips_script_and_style() {
        let content = extract(
            "<html><head><style>body { color: red; }</style></head>\
             <body><script>var secret = 1;</script><p>Visible</p></body></html>",
        );
        assert!(!content.text.contains("secret"));
        assert!(!content.text.contains("color"));
        assert_eq!(content.text, "Visible ");
    }

    #[test]
    fn test_title_metadata() {
        let content = extract("<html><head><title> My Page </title></head><body>x</body></html>");
        assert_eq!(
            content.metadata,
            FormatMetadata::Html {
                title: Some("My Page".to_string())
            }
        );
    }

    #[test]
    fn test_missing_title() {
        let content = extract("<p>no head here</p>");
        assert_eq!(content.metadata, FormatMetadata::Html { title: None });
        assert_eq!(content.text, "no head here ");
    }

    #[test]
    fn test_entities_decoded() {
        let content = extract("<p>Fish &amp; chips</p>");
        assert_eq!(content.text, "Fish & chips ");
    }

    #[test]
    fn test_handles_both_extensions() {
        let extractor = HtmlExtractor::new();
        assert!(extractor.can_extract("html"));
        assert!(extractor.can_extract("htm"));
    }
}
