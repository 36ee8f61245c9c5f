//! Post-processing of extracted text and assembly of the output envelope.

use docsift_core::{DocumentReference, ExtractedContent, ExtractionOptions, ExtractionOutput};
use docsift_extract::normalize_text;

/// Appended to text cut short by `maxTextLength`.
pub const ELLIPSIS: &str = "...";

/// Apply optional cleanup, then optional truncation.
#[must_use]
pub fn post_process(text: String, options: &ExtractionOptions) -> String {
    let text = if options.cleanup_text {
        normalize_text(&text)
    } else {
        text
    };
    truncate(text, options.max_text_length)
}

/// Keep the first `max_chars` characters and append [`ELLIPSIS`] when
/// anything was cut. Zero means no limit.
#[must_use]
pub fn truncate(mut text: String, max_chars: usize) -> String {
    if max_chars == 0 {
        return text;
    }
    if let Some((cut, _)) = text.char_indices().nth(max_chars) {
        text.truncate(cut);
        text.push_str(ELLIPSIS);
    }
    text
}

/// Number of whitespace-delimited tokens.
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Build the output envelope for one extraction.
///
/// `format` is the extension the document resolved under, so a declared
/// `htm` is reported as `htm`.
#[must_use]
pub fn build_output(
    content: ExtractedContent,
    format: &str,
    reference: &DocumentReference,
    file_size: u64,
    options: &ExtractionOptions,
) -> ExtractionOutput {
    let text = post_process(content.text, options);

    ExtractionOutput {
        word_count: word_count(&text),
        character_count: text.chars().count(),
        text,
        format: format.to_string(),
        filename: reference.file_name_or_default().to_string(),
        file_size,
        metadata: options.extract_metadata.then_some(content.metadata),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsift_core::FormatMetadata;

    fn options(cleanup_text: bool, max_text_length: usize) -> ExtractionOptions {
        ExtractionOptions {
            cleanup_text,
            max_text_length,
            extract_metadata: true,
        }
    }

    #[test]
    fn test_truncation_appends_ellipsis() {
        let text = post_process("abcdefghijklmnopqrstuvwxyz".to_string(), &options(false, 10));
        assert_eq!(text, "abcdefghij...");
        assert_eq!(text.chars().count(), 13);
    }

    #[test]
    fn test_no_truncation_at_exact_length() {
        let text = post_process("abcdefghij".to_string(), &options(false, 10));
        assert_eq!(text, "abcdefghij");
    }

    #[test]
    fn test_zero_means_unlimited() {
        let long = "x".repeat(10_000);
        assert_eq!(post_process(long.clone(), &options(false, 0)), long);
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = truncate("日本語のテキスト".to_string(), 3);
        assert_eq!(text, "日本語...");
    }

    #[test]
    fn test_cleanup_runs_before_truncation() {
        let text = post_process("  a    b    c  ".to_string(), &options(true, 3));
        assert_eq!(text, "a b...");
    }

    #[test]
    fn test_no_cleanup_by_default() {
        let text = post_process("  a    b  ".to_string(), &ExtractionOptions::default());
        assert_eq!(text, "  a    b  ");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("hello world"), 2);
        assert_eq!(word_count("  one\ttwo\nthree  "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn test_build_output() {
        let reference = DocumentReference {
            file_name: Some("notes.txt".to_string()),
            ..Default::default()
        };
        let content = ExtractedContent {
            text: "hello world".to_string(),
            metadata: FormatMetadata::Txt { lines: 1 },
        };

        let output = build_output(
            content,
            "txt",
            &reference,
            11,
            &ExtractionOptions::default(),
        );

        assert_eq!(output.text, "hello world");
        assert_eq!(output.word_count, 2);
        assert_eq!(output.character_count, 11);
        assert_eq!(output.format, "txt");
        assert_eq!(output.filename, "notes.txt");
        assert_eq!(output.file_size, 11);
        assert_eq!(output.metadata, Some(FormatMetadata::Txt { lines: 1 }));
    }

    #[test]
    fn test_build_output_without_metadata() {
        let content = ExtractedContent {
            text: "x".to_string(),
            metadata: FormatMetadata::Txt { lines: 1 },
        };
        let options = ExtractionOptions {
            extract_metadata: false,
            ..Default::default()
        };

        let output = build_output(
            content,
            "txt",
            &DocumentReference::default(),
            0,
            &options,
        );
        assert!(output.metadata.is_none());
        assert_eq!(output.filename, "");
    }
}
