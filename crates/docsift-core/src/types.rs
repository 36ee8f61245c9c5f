//! Core types for docsift.
//!
//! ## Input
//! - [`DocumentReference`]: where a document's bytes may come from
//! - [`SizeValue`]: the loosely typed `size` attribute of a reference
//! - [`ExtractionOptions`]: per-request post-processing switches
//!
//! ## Intermediate
//! - [`RawContent`]: resolved bytes plus an optional extension hint
//! - [`ExtractedContent`]: extractor output before post-processing
//! - [`FormatMetadata`]: format-specific counts and attributes
//!
//! ## Output
//! - [`ExtractionOutput`]: the result envelope returned to the caller
//!
//! ## Retrieval
//! - [`FetchConfig`]: timeout, redirect cap and credentials for outbound HTTP

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::ReferenceError;
use crate::format::normalize_extension;

// ============================================================================
// Document References
// ============================================================================

/// A candidate document as described by the hosting framework.
///
/// Every attribute is optional; at least one byte source (`src`,
/// `downloadUrl`, `url` or `path`) has to resolve for extraction to succeed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Declared extension, with or without a leading dot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// Data URL, raw base64, or an http(s) URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Authoritative byte count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,
    /// Fallback byte count of unreliable type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeValue>,
}

impl DocumentReference {
    /// URL to download from: `downloadUrl`, then `url`, then `path`.
    #[must_use]
    pub fn download_url(&self) -> Option<&str> {
        [&self.download_url, &self.url, &self.path]
            .into_iter()
            .filter_map(|candidate| candidate.as_deref())
            .find(|candidate| !candidate.trim().is_empty())
    }

    /// Byte size of the document.
    ///
    /// `sizeBytes` wins when positive; otherwise `size` is coerced. A
    /// reference carrying neither reports zero.
    pub fn size(&self) -> Result<u64, ReferenceError> {
        if let Some(bytes) = self.size_bytes.filter(|&b| b > 0) {
            return Ok(bytes.unsigned_abs());
        }
        match &self.size {
            Some(value) => value.coerce(),
            None => Ok(0),
        }
    }

    /// Declared extension: the `extension` field, else the file name's.
    #[must_use]
    pub fn declared_extension(&self) -> Option<String> {
        let from_field = self
            .extension
            .as_deref()
            .map(normalize_extension)
            .filter(|ext| !ext.is_empty());

        from_field.or_else(|| {
            self.file_name
                .as_deref()
                .and_then(|name| Path::new(name).extension())
                .and_then(|ext| ext.to_str())
                .map(normalize_extension)
                .filter(|ext| !ext.is_empty())
        })
    }

    /// File name echoed back in the output envelope.
    #[must_use]
    pub fn file_name_or_default(&self) -> &str {
        self.file_name.as_deref().unwrap_or_default()
    }

    /// Short label for log lines.
    #[must_use]
    pub fn label(&self) -> &str {
        self.file_name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// The dynamically typed `size` attribute.
///
/// Deserialisation tries the variants in order, so JSON integers land in
/// `Integer`, other numbers in `Float`, strings in `Text`, and anything else
/// (booleans, arrays, objects) in `Unknown`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Unknown(serde_json::Value),
}

impl SizeValue {
    /// Coerce to a byte count. Fractions are truncated.
    pub fn coerce(&self) -> Result<u64, ReferenceError> {
        match self {
            Self::Integer(n) => u64::try_from(*n)
                .map_err(|_| ReferenceError::InvalidSize(format!("negative size {n}"))),
            Self::Float(f) => float_to_size(*f),
            Self::Text(s) => {
                let s = s.trim();
                if let Ok(n) = s.parse::<u64>() {
                    return Ok(n);
                }
                s.parse::<f64>()
                    .map_err(|_| ReferenceError::InvalidSize(format!("non-numeric size {s:?}")))
                    .and_then(float_to_size)
            }
            Self::Unknown(value) => Err(ReferenceError::InvalidSize(format!(
                "unsupported size type {}",
                json_type_name(value)
            ))),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_to_size(f: f64) -> Result<u64, ReferenceError> {
    if f.is_finite() && f >= 0.0 && f < u64::MAX as f64 {
        Ok(f.trunc() as u64)
    } else {
        Err(ReferenceError::InvalidSize(format!("size {f} out of range")))
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ============================================================================
// Extraction
// ============================================================================

/// Resolved document bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawContent {
    data: Vec<u8>,
    extension: Option<String>,
}

impl RawContent {
    /// Bytes with no extension hint.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            extension: None,
        }
    }

    /// Bytes with an extension inferred by the source that produced them.
    #[must_use]
    pub fn with_extension(data: Vec<u8>, extension: impl Into<String>) -> Self {
        Self {
            data,
            extension: Some(normalize_extension(&extension.into())),
        }
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Extension hint, overriding the declared one when present.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, Option<String>) {
        (self.data, self.extension)
    }
}

/// Content extracted from a document.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedContent {
    /// Unstructured text
    pub text: String,
    /// Format-specific metadata
    pub metadata: FormatMetadata,
}

/// Metadata produced by each extractor.
///
/// Serialises as a flat map whose `format` key names the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum FormatMetadata {
    Pdf {
        pages: usize,
    },
    Docx {
        paragraphs: usize,
    },
    Html {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
    },
    Xml {
        elements: usize,
    },
    Txt {
        lines: usize,
    },
}

/// Per-request post-processing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionOptions {
    /// Collapse whitespace and blank-line runs
    pub cleanup_text: bool,
    /// Truncate to this many characters (0 = unlimited)
    pub max_text_length: usize,
    /// Include the metadata map in the output
    pub extract_metadata: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            cleanup_text: false,
            max_text_length: 0,
            extract_metadata: true,
        }
    }
}

/// The result envelope handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOutput {
    pub text: String,
    pub word_count: usize,
    pub character_count: usize,
    /// Lower-case extension without a dot
    pub format: String,
    pub filename: String,
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FormatMetadata>,
}

// ============================================================================
// Retrieval
// ============================================================================

/// Default per-request timeout for outbound HTTP.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default cap on redirect hops.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;

/// Configuration for outbound HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum redirect hops per request
    pub max_redirects: usize,
    /// User-Agent header
    pub user_agent: String,
    /// Bearer token for generic downloads
    pub auth_token: Option<String>,
}

impl FetchConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: concat!("docsift/", env!("CARGO_PKG_VERSION")).to_string(),
            auth_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reference(value: serde_json::Value) -> DocumentReference {
        serde_json::from_value(value).unwrap()
    }

    // ========== Size Coercion ==========

    #[test]
    fn test_size_prefers_positive_size_bytes() {
        let r = reference(json!({"sizeBytes": 2048, "size": "1024"}));
        assert_eq!(r.size().unwrap(), 2048);
    }

    #[test]
    fn test_size_zero_size_bytes_falls_back_to_text() {
        let r = reference(json!({"sizeBytes": 0, "size": "1024"}));
        assert_eq!(r.size().unwrap(), 1024);
    }

    #[test]
    fn test_size_float_truncates() {
        let r = reference(json!({"size": 3.0}));
        assert_eq!(r.size, Some(SizeValue::Float(3.0)));
        assert_eq!(r.size().unwrap(), 3);

        let r = reference(json!({"size": 7.9}));
        assert_eq!(r.size().unwrap(), 7);
    }

    #[test]
    fn test_size_integer() {
        let r = reference(json!({"size": 512}));
        assert_eq!(r.size, Some(SizeValue::Integer(512)));
        assert_eq!(r.size().unwrap(), 512);
    }

    #[test]
    fn test_size_bool_is_type_error() {
        let r = reference(json!({"size": true}));
        assert!(matches!(r.size, Some(SizeValue::Unknown(_))));
        let err = r.size().unwrap_err();
        assert!(err.to_string().contains("bool"));
    }

    #[test]
    fn test_size_non_numeric_text_is_error() {
        let value = SizeValue::Text("large".to_string());
        assert!(value.coerce().is_err());
    }

    #[test]
    fn test_size_numeric_text_with_fraction() {
        let value = SizeValue::Text(" 12.5 ".to_string());
        assert_eq!(value.coerce().unwrap(), 12);
    }

    #[test]
    fn test_size_negative_is_error() {
        assert!(SizeValue::Integer(-1).coerce().is_err());
        assert!(SizeValue::Float(-0.5).coerce().is_err());
    }

    #[test]
    fn test_size_missing_reports_zero() {
        assert_eq!(DocumentReference::default().size().unwrap(), 0);
    }

    // ========== Download URL ==========

    #[test]
    fn test_download_url_preference_order() {
        let r = reference(json!({
            "downloadUrl": "https://a.example/1",
            "url": "https://b.example/2",
            "path": "/files/3"
        }));
        assert_eq!(r.download_url(), Some("https://a.example/1"));

        let r = reference(json!({"url": "https://b.example/2", "path": "/files/3"}));
        assert_eq!(r.download_url(), Some("https://b.example/2"));

        let r = reference(json!({"path": "/files/3"}));
        assert_eq!(r.download_url(), Some("/files/3"));
    }

    #[test]
    fn test_download_url_skips_empty_strings() {
        let r = reference(json!({"downloadUrl": "", "url": "https://b.example/2"}));
        assert_eq!(r.download_url(), Some("https://b.example/2"));
        assert_eq!(DocumentReference::default().download_url(), None);
    }

    // ========== Declared Extension ==========

    #[test]
    fn test_declared_extension_from_field() {
        let r = reference(json!({"extension": ".PDF", "fileName": "notes.txt"}));
        assert_eq!(r.declared_extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn test_declared_extension_from_file_name() {
        let r = reference(json!({"fileName": "Report.DOCX"}));
        assert_eq!(r.declared_extension().as_deref(), Some("docx"));
    }

    #[test]
    fn test_declared_extension_absent() {
        let r = reference(json!({"fileName": "README"}));
        assert_eq!(r.declared_extension(), None);
    }

    // ========== Metadata / Output Serialization ==========

    #[test]
    fn test_format_metadata_serializes_flat() {
        let value = serde_json::to_value(FormatMetadata::Pdf { pages: 3 }).unwrap();
        assert_eq!(value, json!({"format": "pdf", "pages": 3}));

        let value = serde_json::to_value(FormatMetadata::Html { title: None }).unwrap();
        assert_eq!(value, json!({"format": "html"}));
    }

    #[test]
    fn test_output_uses_camel_case_keys() {
        let output = ExtractionOutput {
            text: "hi".to_string(),
            word_count: 1,
            character_count: 2,
            format: "txt".to_string(),
            filename: "a.txt".to_string(),
            file_size: 2,
            metadata: None,
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["wordCount"], 1);
        assert_eq!(value["characterCount"], 2);
        assert_eq!(value["fileSize"], 2);
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_options_defaults_and_partial_json() {
        let options: ExtractionOptions = serde_json::from_value(json!({"cleanupText": true})).unwrap();
        assert!(options.cleanup_text);
        assert_eq!(options.max_text_length, 0);
        assert!(options.extract_metadata);
    }

    // ========== Raw Content / Fetch Config ==========

    #[test]
    fn test_raw_content_normalizes_hint() {
        let raw = RawContent::with_extension(b"x".to_vec(), ".PDF");
        assert_eq!(raw.extension(), Some("pdf"));
        assert_eq!(raw.len(), 1);
        assert!(RawContent::new(Vec::new()).is_empty());
    }

    #[test]
    fn test_fetch_config_defaults() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_redirects, 10);
        assert!(config.user_agent.starts_with("docsift/"));
        assert!(config.auth_token.is_none());
    }
}
