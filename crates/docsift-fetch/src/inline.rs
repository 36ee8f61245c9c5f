//! Documents embedded in the reference itself.

use base64::{Engine as _, engine::general_purpose};
use docsift_core::FetchError;

/// Scheme prefix of an RFC 2397 data URL.
pub const DATA_URL_PREFIX: &str = "data:";

/// Decode the payload of a base64 data URL.
///
/// Everything after the first comma is the payload. A URL without a comma,
/// or whose payload is not valid base64, is rejected.
pub fn decode_data_url(src: &str) -> Result<Vec<u8>, FetchError> {
    let Some((_header, payload)) = src.split_once(',') else {
        return Err(FetchError::InvalidDataUrl(
            "missing ',' between header and payload".to_string(),
        ));
    };

    general_purpose::STANDARD
        .decode(strip_whitespace(payload))
        .map_err(|e| FetchError::InvalidDataUrl(format!("payload is not base64: {e}")))
}

/// Try to read `src` as bare base64. `None` means it is something else.
#[must_use]
pub fn probe_base64(src: &str) -> Option<Vec<u8>> {
    general_purpose::STANDARD
        .decode(strip_whitespace(src))
        .ok()
        .filter(|data| !data.is_empty())
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_ascii_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_data_url() {
        let data = decode_data_url("data:text/plain;base64,aGVsbG8gd29ybGQ=").unwrap();
        assert_eq!(data, b"hello world");
    }

    #[test]
    fn test_decode_data_url_splits_on_first_comma_only() {
        let encoded = general_purpose::STANDARD.encode("a,b,c");
        let data = decode_data_url(&format!("data:text/csv;base64,{encoded}")).unwrap();
        assert_eq!(data, b"a,b,c");
    }

    #[test]
    fn test_decode_data_url_without_comma() {
        let result = decode_data_url("data:text/plain;base64");
        assert!(matches!(result, Err(FetchError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_decode_data_url_bad_payload_is_error() {
        let result = decode_data_url("data:application/pdf;base64,not*base64!");
        assert!(matches!(result, Err(FetchError::InvalidDataUrl(_))));
    }

    #[test]
    fn test_decode_data_url_tolerates_line_breaks() {
        let data = decode_data_url("data:text/plain;base64,aGVsbG8g\nd29ybGQ=").unwrap();
        assert_eq!(data, b"hello world");
    }

    #[test]
    fn test_probe_base64() {
        assert_eq!(probe_base64("aGVsbG8=").as_deref(), Some(&b"hello"[..]));
        assert_eq!(probe_base64("/files/report.pdf"), None);
        assert_eq!(probe_base64("   "), None);
    }
}
