//! Whitespace and punctuation normalisation.
//!
//! Applied to every reconstructed PDF text and, on request, to the output of
//! any extractor.

use regex::Regex;
use std::sync::LazyLock;

static HORIZONTAL_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("horizontal whitespace pattern"));

static SPACE_AROUND_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?\n ?").expect("newline padding pattern"));

static BLANK_LINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank line pattern"));

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +([.,;:!?])").expect("punctuation spacing pattern"));

static MISSING_SENTENCE_GAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])(\p{Lu})").expect("sentence gap pattern"));

/// Normalise extracted text.
///
/// Trims, collapses runs of spaces and tabs to a single space, removes
/// spaces before `.,;:!?`, separates a sentence terminator from a following
/// capital, and caps blank-line runs at one empty line. Applying it twice
/// yields the same string as applying it once.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    let text = HORIZONTAL_SPACE.replace_all(text.trim(), " ");
    let text = SPACE_AROUND_NEWLINE.replace_all(&text, "\n");
    let text = BLANK_LINE_RUN.replace_all(&text, "\n\n");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "${1}");
    let text = MISSING_SENTENCE_GAP.replace_all(&text, "${1} ${2}");
    text.trim().to_string()
}
