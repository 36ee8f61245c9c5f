//! Format detection.

use docsift_core::{DocumentFormat, ExtractError, normalize_extension};
use tracing::debug;

/// The extension a document is reported under: the fetch `hint` when
/// present, else the `declared` one, normalized. `None` when both are
/// absent or empty.
#[must_use]
pub fn effective_extension(declared: Option<&str>, hint: Option<&str>) -> Option<String> {
    hint.or(declared)
        .map(normalize_extension)
        .filter(|ext| !ext.is_empty())
}

/// Decide which extractor handles a document.
///
/// A `hint` inferred while fetching wins over the `declared` extension.
/// With neither, the leading bytes are sniffed. A present but unknown
/// extension is an error rather than a reason to sniff.
pub fn resolve_format(
    declared: Option<&str>,
    hint: Option<&str>,
    data: &[u8],
) -> Result<DocumentFormat, ExtractError> {
    match effective_extension(declared, hint) {
        Some(ext) => DocumentFormat::from_extension(&ext)
            .ok_or_else(|| ExtractError::UnsupportedFormat(ext)),
        None => {
            let format = DocumentFormat::sniff(data);
            debug!("No extension available, sniffed {}", format);
            Ok(format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_overrides_declared() {
        let format = resolve_format(Some("txt"), Some("pdf"), b"").unwrap();
        assert_eq!(format, DocumentFormat::Pdf);
    }

    #[test]
    fn test_declared_used_without_hint() {
        let format = resolve_format(Some(".DOCX"), None, b"%PDF-1.4").unwrap();
        assert_eq!(format, DocumentFormat::Docx);
    }

    #[test]
    fn test_htm_alias() {
        let format = resolve_format(Some("htm"), None, b"").unwrap();
        assert_eq!(format, DocumentFormat::Html);
        assert_eq!(format.extension(), "html");
    }

    #[test]
    fn test_effective_extension() {
        assert_eq!(effective_extension(Some(".HTM"), None).as_deref(), Some("htm"));
        assert_eq!(effective_extension(Some("txt"), Some("pdf")).as_deref(), Some("pdf"));
        assert_eq!(effective_extension(Some(""), None), None);
        assert_eq!(effective_extension(None, None), None);
    }

    #[test]
    fn test_sniffs_without_extension() {
        assert_eq!(resolve_format(None, None, b"%PDF-1.7").unwrap(), DocumentFormat::Pdf);
        assert_eq!(resolve_format(Some(""), None, b"<?xml version=\"1.0\"?><a/>").unwrap(), DocumentFormat::Xml);
        assert_eq!(resolve_format(None, None, b"hello").unwrap(), DocumentFormat::Txt);
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let result = resolve_format(Some("pptx"), None, b"%PDF-1.7");
        assert!(matches!(result, Err(ExtractError::UnsupportedFormat(ext)) if ext == "pptx"));
    }
}
