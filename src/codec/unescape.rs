//! Strict query-component unescaping: `+` is a space, every `%` needs two hex digits.

use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use thiserror::Error;

use super::diagnostics::{Diagnostic, DiagnosticSink};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnescapeError {
    #[error("invalid URL escape {0:?}")]
    InvalidEscape(String),
    #[error("decoded value is not valid UTF-8")]
    InvalidUtf8,
}

/// Decode one query component.
pub fn query_unescape(s: &str) -> Result<String, UnescapeError> {
    let bytes = s.as_bytes();
    for (i, _) in s.match_indices('%') {
        let valid = bytes.len() > i + 2
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        if !valid {
            let end = (i + 3).min(bytes.len());
            let bad = String::from_utf8_lossy(&bytes[i..end]).into_owned();
            return Err(UnescapeError::InvalidEscape(bad));
        }
    }
    let spaced = s.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| UnescapeError::InvalidUtf8)
}

/// Decode `raw`, or report the failure to `sink` and hand back `raw` unchanged.
pub fn unescape_or_raw(key: &str, raw: &str, sink: &dyn DiagnosticSink) -> String {
    match query_unescape(raw) {
        Ok(v) => v,
        Err(e) => {
            sink.report(Diagnostic::PercentDecode {
                key: key.to_string(),
                value: raw.to_string(),
                reason: e.to_string(),
            });
            raw.to_string()
        }
    }
}
