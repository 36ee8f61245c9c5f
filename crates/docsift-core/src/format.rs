//! Document formats and magic-byte sniffing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of leading bytes inspected when sniffing content.
pub const SNIFF_WINDOW: usize = 1000;

/// Extensions recognised as documents, including aliases.
pub const KNOWN_EXTENSIONS: &[&str] = &["pdf", "docx", "html", "htm", "xml", "txt"];

/// A document format the engine can extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Html,
    Xml,
    Txt,
}

impl DocumentFormat {
    /// All formats, in detection order.
    pub const ALL: [Self; 5] = [Self::Pdf, Self::Docx, Self::Html, Self::Xml, Self::Txt];

    /// Parse an extension, with or without a leading dot, case-insensitively.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = normalize_extension(ext);
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "html" | "htm" => Some(Self::Html),
            "xml" => Some(Self::Xml),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    /// Canonical extension without a dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Html => "html",
            Self::Xml => "xml",
            Self::Txt => "txt",
        }
    }

    /// Classify content by its leading bytes.
    ///
    /// ZIP containers are always reported as DOCX; other OOXML or ODF
    /// packages are not told apart.
    #[must_use]
    pub fn sniff(data: &[u8]) -> Self {
        let window = &data[..data.len().min(SNIFF_WINDOW)];

        if window.starts_with(b"%PDF") {
            return Self::Pdf;
        }
        if window.starts_with(b"PK\x03\x04") {
            return Self::Docx;
        }

        let head = String::from_utf8_lossy(window);
        if head.contains("<html") || head.contains("<!DOCTYPE html") {
            return Self::Html;
        }
        if window.starts_with(b"<?xml") {
            return Self::Xml;
        }

        Self::Txt
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Lower-case an extension and strip any leading dots and surrounding whitespace.
#[must_use]
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
