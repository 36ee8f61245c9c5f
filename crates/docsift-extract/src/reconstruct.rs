//! Readable text from raw PDF text fragments.
//!
//! Content streams either draw whole words and lines per operator, or draw
//! one glyph at a time. The two cases need different joining rules, so the
//! fragments are first classified into a [`Regime`]:
//!
//! - [`Regime::Character`]: concatenate every fragment and rebuild words
//!   character by character, dropping glyphs rendered twice for bold effects
//! - [`Regime::Block`]: join trimmed fragments with single spaces
//!
//! Either way the result is passed through [`normalize_text`].

use crate::cleanup::normalize_text;
use tracing::debug;

/// Single-character fragments must outnumber multi-character ones by this
/// factor before the character regime applies.
pub const CHAR_REGIME_RATIO: usize = 2;

const PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '(', ')', '[', ']', '{', '}', '"', '\''];
const SENTENCE_END: &[char] = &['.', '!', '?'];
const CURRENCY: &[char] = &['$', '€', '£', '¥'];
const STANDALONE: &[char] = &['&', '@', '#', '%', '/', '-'];

/// Fragment granularity of a content stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Character,
    Block,
}

/// Reconstruct text from fragments in drawing order.
#[must_use]
pub fn reconstruct<S: AsRef<str>>(fragments: &[S]) -> String {
    let sanitized: Vec<String> = fragments
        .iter()
        .map(|f| sanitize_fragment(f.as_ref()))
        .collect();

    let regime = classify(&sanitized);
    debug!(
        "Reconstructing {} PDF fragments in {:?} regime",
        sanitized.len(),
        regime
    );

    let text = match regime {
        Regime::Character => {
            let chars: Vec<char> = sanitized.iter().flat_map(|f| f.chars()).collect();
            reconstruct_characters(&chars)
        }
        Regime::Block => reconstruct_blocks(&sanitized),
    };

    normalize_text(&text)
}

/// Strip code points that never belong in extracted text.
#[must_use]
pub fn sanitize_fragment(fragment: &str) -> String {
    fragment
        .chars()
        .filter_map(|c| match c {
            '\u{00A0}' => Some(' '),
            '\u{FFFD}' | '\0' => None,
            '\n' | '\t' | '\r' => Some(c),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Decide the regime from trimmed fragment lengths.
#[must_use]
pub fn classify<S: AsRef<str>>(fragments: &[S]) -> Regime {
    let (mut single, mut multi) = (0usize, 0usize);
    for fragment in fragments {
        match fragment.as_ref().trim().chars().count() {
            0 => {}
            1 => single += 1,
            _ => multi += 1,
        }
    }

    if single > multi * CHAR_REGIME_RATIO {
        Regime::Character
    } else {
        Regime::Block
    }
}

fn reconstruct_characters(chars: &[char]) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut word = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && chars[i - 1] == c && is_rendering_duplicate(chars, i) {
            continue;
        }

        match c {
            '\n' => {
                flush_word(&mut out, &mut word);
                out.truncate(out.trim_end_matches(' ').len());
                out.push('\n');
            }
            c if c.is_whitespace() => {
                flush_word(&mut out, &mut word);
                if !out.is_empty() && !ends_with_break(&out) {
                    out.push(' ');
                }
            }
            c if PUNCTUATION.contains(&c) => {
                flush_word(&mut out, &mut word);
                out.push(c);
                if SENTENCE_END.contains(&c) && i + 1 < chars.len() {
                    out.push(' ');
                }
            }
            c if c.is_alphanumeric() => word.push(c),
            c if CURRENCY.contains(&c) => {
                let had_word = !word.is_empty();
                flush_word(&mut out, &mut word);
                if had_word {
                    out.push(' ');
                }
                out.push(c);
            }
            c if STANDALONE.contains(&c) => {
                flush_word(&mut out, &mut word);
                if !out.is_empty() && !ends_with_break(&out) {
                    out.push(' ');
                }
                out.push(c);
                out.push(' ');
            }
            c => word.push(c),
        }
    }

    flush_word(&mut out, &mut word);
    out
}

/// A repeated character is a rendering artefact unless it is a lowercase
/// letter, or an uppercase letter inside a word.
fn is_rendering_duplicate(chars: &[char], i: usize) -> bool {
    let c = chars[i];
    if !c.is_alphabetic() {
        return true;
    }
    if c.is_uppercase() {
        let letter_before = i >= 2 && chars[i - 2].is_alphabetic();
        let letter_after = chars.get(i + 1).is_some_and(|n| n.is_alphabetic());
        return !(letter_before && letter_after);
    }
    false
}

fn flush_word(out: &mut String, word: &mut String) {
    out.push_str(word);
    word.clear();
}

fn ends_with_break(out: &str) -> bool {
    out.ends_with(|c: char| c == ' ' || c == '\n')
}

fn reconstruct_blocks<S: AsRef<str>>(fragments: &[S]) -> String {
    let mut out = String::new();

    for fragment in fragments {
        let fragment = fragment.as_ref().trim();
        if fragment.is_empty() {
            continue;
        }

        if let Some(last) = out.chars().next_back() {
            let starts_lowercase = fragment.chars().next().is_some_and(char::is_lowercase);
            let glued = last.is_whitespace() || (SENTENCE_END.contains(&last) && starts_lowercase);
            if !glued {
                out.push(' ');
            }
        }
        out.push_str(fragment);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn singles(n: usize) -> Vec<String> {
        (0..n).map(|i| ((b'a' + (i % 26) as u8) as char).to_string()).collect()
    }

    fn multis(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("word{i}")).collect()
    }

    // ========== Classification ==========

    #[test]
    fn test_classify_char_regime() {
        let mut fragments = singles(20);
        fragments.extend(multis(5));
        assert_eq!(classify(&fragments), Regime::Character);
    }

    #[test]
    fn test_classify_block_regime() {
        let mut fragments = singles(5);
        fragments.extend(multis(20));
        assert_eq!(classify(&fragments), Regime::Block);
    }

    #[test]
    fn test_classify_ratio_is_strict() {
        let mut fragments = singles(10);
        fragments.extend(multis(5));
        assert_eq!(classify(&fragments), Regime::Block);
    }

    #[test]
    fn test_classify_ignores_whitespace_fragments() {
        let fragments = vec![" ", "\n", "", "Hello"];
        assert_eq!(classify(&fragments), Regime::Block);
    }

    // ========== Sanitization ==========

    #[test]
    fn test_sanitize_fragment() {
        assert_eq!(sanitize_fragment("a\u{00A0}b"), "a b");
        assert_eq!(sanitize_fragment("a\u{FFFD}\0b"), "ab");
        assert_eq!(sanitize_fragment("a\u{0007}\u{001B}b"), "ab");
        assert_eq!(sanitize_fragment("a\tb\r\nc"), "a\tb\r\nc");
    }

    // ========== Character Regime ==========

    #[test]
    fn test_character_regime_rebuilds_words() {
        let fragments: Vec<String> = "Hello world.".chars().map(String::from).collect();
        assert_eq!(reconstruct(&fragments), "Hello world.");
    }

    #[test]
    fn test_character_regime_drops_doubled_punctuation() {
        let chars: Vec<char> = "Hi!! ok".chars().collect();
        assert_eq!(reconstruct_characters(&chars), "Hi! ok");
    }

    #[test]
    fn test_character_regime_keeps_lowercase_duplicates() {
        let chars: Vec<char> = "book".chars().collect();
        assert_eq!(reconstruct_characters(&chars), "book");
    }

    #[test]
    fn test_character_regime_uppercase_duplicates() {
        let chars: Vec<char> = "BOOK".chars().collect();
        assert_eq!(reconstruct_characters(&chars), "BOOK");

        let chars: Vec<char> = "AAlpha".chars().collect();
        assert_eq!(reconstruct_characters(&chars), "Alpha");
    }

    #[test]
    fn test_character_regime_sentence_spacing() {
        let chars: Vec<char> = "End.Next".chars().collect();
        assert_eq!(reconstruct_characters(&chars), "End. Next");

        let chars: Vec<char> = "End.".chars().collect();
        assert_eq!(reconstruct_characters(&chars), "End.");
    }

    #[test]
    fn test_character_regime_currency_and_symbols() {
        let chars: Vec<char> = "cost$5".chars().collect();
        assert_eq!(reconstruct_characters(&chars), "cost $5");

        let chars: Vec<char> = "R&D".chars().collect();
        assert_eq!(reconstruct_characters(&chars), "R & D");
    }

    #[test]
    fn test_character_regime_keeps_newlines() {
        let chars: Vec<char> = "one \ntwo".chars().collect();
        assert_eq!(reconstruct_characters(&chars), "one\ntwo");
    }

    // ========== Block Regime ==========

    #[test]
    fn test_block_regime_joins_with_spaces() {
        let fragments = vec!["Hello", " world ", "", "again"];
        assert_eq!(reconstruct(&fragments), "Hello world again");
    }

    #[test]
    fn test_block_regime_glues_lowercase_after_terminator() {
        let fragments = vec!["example.", "com is up."];
        assert_eq!(reconstruct_blocks(&fragments), "example.com is up.");

        let fragments = vec!["First.", "Second"];
        assert_eq!(reconstruct_blocks(&fragments), "First. Second");
    }

    #[test]
    fn test_reconstruct_output_is_normalized() {
        let fragments = vec!["Hello ,", "world !", "Bye"];
        let text = reconstruct(&fragments);
        assert_eq!(text, "Hello, world! Bye");
        assert_eq!(normalize_text(&text), text);
    }

    #[test]
    fn test_reconstruct_empty() {
        let fragments: Vec<String> = Vec::new();
        assert_eq!(reconstruct(&fragments), "");
    }
}
