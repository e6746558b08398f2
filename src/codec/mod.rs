//! Wire codec: gateway request URLs into [`Request`] values.
//!
//! Decoding is strict only about URL structure. Field-level noise (bad
//! percent-escapes, non-numeric integers) is reported to a [`DiagnosticSink`]
//! and never fails the decode.

pub mod diagnostics;
pub mod unescape;

pub use diagnostics::{Diagnostic, DiagnosticSink, RecordingSink, TracingSink};
pub use unescape::{query_unescape, unescape_or_raw, UnescapeError};

use chrono::Utc;
use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::models::request::{QueryData, Request};

/// Query keys read into typed [`Request`] fields; anything else is ad hoc data.
pub const NAMED_KEYS: [&str; 19] = [
    "protocol",
    "subscriber",
    "user_id",
    "service",
    "lang",
    "abonent",
    "serviceId",
    "bad_command",
    "scenario",
    "input_type",
    "event",
    "event.type",
    "event.text",
    "event.url",
    "event.referer",
    "event.media_type",
    "event.source",
    "event.order",
    "event.size",
];

/// Decode a gateway request URL, reporting field warnings through `tracing`.
pub fn decode(raw_url: &str) -> AppResult<Request> {
    decode_with(raw_url, &TracingSink)
}

/// Decode a gateway request URL, reporting field warnings to `sink`.
pub fn decode_with(raw_url: &str, sink: &dyn DiagnosticSink) -> AppResult<Request> {
    let url = Url::parse(raw_url).map_err(|e| AppError::MalformedUrl(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(AppError::MalformedUrl(format!(
            "{raw_url:?} is not a hierarchical request URI"
        )));
    }

    let path = percent_decode_str(url.path()).decode_utf8_lossy();
    let page = path.strip_prefix('/').unwrap_or(&*path).to_string();
    let data = parse_query(url.query().unwrap_or(""), sink);

    let field = |key: &str| match data.get(key) {
        Some(raw) => unescape_or_raw(key, raw, sink),
        None => String::new(),
    };
    let int_field = |key: &str| parse_int(key, &field(key), sink);

    let mut r = Request {
        request_url: url.to_string(),
        page,
        protocol: field("protocol"),
        subscriber: field("subscriber"),
        user_id: field("user_id"),
        service: field("service"),
        lang: field("lang"),
        abonent: field("abonent"),
        service_id: field("serviceId"),
        bad_command: field("bad_command"),
        date: Utc::now().timestamp(),
        scenario: field("scenario"),
        input_type: field("input_type"),
        ..Default::default()
    };
    r.event.event = field("event");
    r.event.event_type = field("event.type");
    r.event.text = field("event.text");
    r.event.url = field("event.url");
    r.event.referer = field("event.referer");
    r.event.media_type = field("event.media_type");
    r.event.source = field("event.source");
    r.event.order = int_field("event.order");
    r.event.size = int_field("event.size");
    r.data = data;

    debug!(page = %r.page, protocol = %r.protocol, event = %r.event.event, "decoded request");
    Ok(r)
}

/// Split a raw query into pairs. Keys are decoded, values are kept encoded.
fn parse_query(query: &str, sink: &dyn DiagnosticSink) -> QueryData {
    let mut data = QueryData::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        data.append(unescape_or_raw(key, key, sink), value);
    }
    data
}

/// Base-10 `i64`, zero on failure. Absent fields are zero without a report.
fn parse_int(key: &str, value: &str, sink: &dyn DiagnosticSink) -> i64 {
    if value.is_empty() {
        return 0;
    }
    value.parse().unwrap_or_else(|_| {
        sink.report(Diagnostic::IntegerParse {
            key: key.to_string(),
            value: value.to_string(),
        });
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::{EMPTY_EVENT, EVENT_MESSAGE, EVENT_TYPE_TEXT};

    #[test]
    fn decodes_page_and_protocol() {
        let r = decode("https://h/mypage?protocol=ussd").unwrap();
        assert_eq!(r.page, "mypage");
        assert_eq!(r.protocol, "ussd");
        assert_eq!(r.event.event, "");
        assert_eq!(r.event.to_string(), EMPTY_EVENT);
    }

    #[test]
    fn root_path_yields_empty_page() {
        assert_eq!(decode("https://h/").unwrap().page, "");
        assert_eq!(decode("https://h").unwrap().page, "");
    }

    #[test]
    fn nested_path_keeps_inner_separators() {
        assert_eq!(decode("http://h/shop/cart%20x").unwrap().page, "shop/cart x");
    }

    #[test]
    fn rejects_non_urls() {
        assert!(matches!(decode("not a url"), Err(AppError::MalformedUrl(_))));
        assert!(matches!(decode("/relative?x=1"), Err(AppError::MalformedUrl(_))));
        assert!(matches!(decode("mailto:someone"), Err(AppError::MalformedUrl(_))));
    }

    #[test]
    fn reads_every_named_key() {
        let r = decode(
            "https://gw.example/chat?protocol=telegram&subscriber=42&user_id=u7&service=bot\
             &lang=ru&abonent=79990000000&serviceId=55&bad_command=%2Fstart&scenario=default\
             &input_type=text&event=message&event.type=text&event.text=hello+world\
             &event.url=u&event.referer=r&event.media_type=photo&event.source=src\
             &event.order=4&event.size=1024",
        )
        .unwrap();
        assert_eq!(r.page, "chat");
        assert_eq!(r.protocol, "telegram");
        assert_eq!(r.subscriber, "42");
        assert_eq!(r.user_id, "u7");
        assert_eq!(r.service, "bot");
        assert_eq!(r.lang, "ru");
        assert_eq!(r.abonent, "79990000000");
        assert_eq!(r.service_id, "55");
        assert_eq!(r.bad_command, "/start");
        assert_eq!(r.scenario, "default");
        assert_eq!(r.input_type, "text");
        assert_eq!(r.event.event, EVENT_MESSAGE);
        assert_eq!(r.event.event_type, EVENT_TYPE_TEXT);
        assert_eq!(r.event.text, "hello world");
        assert_eq!(r.event.url, "u");
        assert_eq!(r.event.referer, "r");
        assert_eq!(r.event.media_type, "photo");
        assert_eq!(r.event.source, "src");
        assert_eq!(r.event.order, 4);
        assert_eq!(r.event.size, 1024);
    }

    #[test]
    fn service_id_snake_case_key_is_not_read() {
        let r = decode("https://h/p?service_id=9").unwrap();
        assert_eq!(r.service_id, "");
        assert_eq!(r.get_field("service_id"), "9");
    }

    #[test]
    fn bad_integers_decode_as_zero() {
        let sink = RecordingSink::default();
        let r = decode_with("https://h/p?event.order=notanumber&event.size=12", &sink).unwrap();
        assert_eq!(r.event.order, 0);
        assert_eq!(r.event.size, 12);
        assert_eq!(
            sink.take(),
            vec![Diagnostic::IntegerParse {
                key: "event.order".into(),
                value: "notanumber".into()
            }]
        );
    }

    #[test]
    fn bad_percent_escape_keeps_raw_value() {
        let sink = RecordingSink::default();
        let r = decode_with("https://h/p?event.text=100%25%zz&lang=en", &sink).unwrap();
        assert_eq!(r.event.text, "100%25%zz");
        assert_eq!(r.lang, "en");
        let seen = sink.take();
        assert_eq!(seen.len(), 1);
        assert!(matches!(&seen[0], Diagnostic::PercentDecode { key, .. } if key == "event.text"));
    }

    #[test]
    fn data_keeps_raw_values_for_ad_hoc_lookups() {
        let r = decode("https://h/form?name=J%C3%BCrgen+M&extra=a%26b").unwrap();
        assert_eq!(r.data.get("name"), Some("J%C3%BCrgen+M"));
        assert_eq!(r.get_field("name"), "Jürgen M");
        assert_eq!(r.get_field("extra"), "a&b");
    }

    #[test]
    fn date_is_stamped_at_decode_time() {
        let before = Utc::now().timestamp();
        let r = decode("https://h/p?date=5").unwrap();
        assert!(r.date >= before);
        assert_ne!(r.date, 5);
    }

    #[test]
    fn request_url_is_retained() {
        let r = decode("https://h/p?protocol=wap").unwrap();
        assert_eq!(r.request_url, "https://h/p?protocol=wap");
    }
}
