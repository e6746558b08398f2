//! Inbound gateway events: link clicks, user messages and pushes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::codec::{Diagnostic, DiagnosticSink, TracingSink};

pub const EVENT_LINK: &str = "link";
pub const EVENT_MESSAGE: &str = "message";
pub const EVENT_PUSH: &str = "push";

pub const EVENT_TYPE_FILE: &str = "file"; // message
pub const EVENT_TYPE_TEXT: &str = "text"; // message
pub const EVENT_TYPE_HTTP: &str = "http"; // push

pub const EVENT_MEDIA_TYPE_PHOTO: &str = "photo"; // file

/// Rendering of an event whose tag is empty.
pub const EMPTY_EVENT: &str = "Empty event";

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// Flat event record. Fields not used by the variant named in `event` stay empty or zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub event: String,
    #[serde(rename = "event.type", default, skip_serializing_if = "String::is_empty")]
    pub event_type: String,
    #[serde(rename = "event.text", default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(rename = "event.order", default, skip_serializing_if = "is_zero")]
    pub order: i64,
    #[serde(rename = "event.url", default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(rename = "event.referer", default, skip_serializing_if = "String::is_empty")]
    pub referer: String,
    #[serde(rename = "event.media_type", default, skip_serializing_if = "String::is_empty")]
    pub media_type: String,
    #[serde(rename = "event.source", default, skip_serializing_if = "String::is_empty")]
    pub source: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub size: i64,
}

impl Event {
    /// `true` when the `event` tag is empty.
    pub fn is_empty(&self) -> bool {
        self.event.is_empty()
    }

    pub fn is_known(&self) -> bool {
        matches!(self.event.as_str(), EVENT_LINK | EVENT_MESSAGE | EVENT_PUSH)
    }

    /// Fixed-order diagnostic dump, every field present.
    pub fn all_fields(&self) -> String {
        format!(
            "event=\"{}\"&type=\"{}\"&text=\"{}\"&order=\"{}\"&url=\"{}\"&referer=\"{}\"&media_type=\"{}\"&size=\"{}\"&source=\"{}\"",
            self.event,
            self.event_type,
            self.text,
            self.order,
            self.url,
            self.referer,
            self.media_type,
            self.size,
            self.source
        )
    }

    /// Human rendering. Unknown tags are reported to `sink` but still rendered in full.
    pub fn render(&self, sink: &dyn DiagnosticSink) -> String {
        if self.is_empty() {
            return EMPTY_EVENT.to_string();
        }
        if !self.is_known() {
            sink.report(Diagnostic::UnknownEvent {
                event: self.event.clone(),
            });
        }
        self.all_fields()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&TracingSink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RecordingSink;

    #[test]
    fn empty_event_renders_sentinel() {
        assert_eq!(Event::default().to_string(), EMPTY_EVENT);
    }

    #[test]
    fn all_fields_has_fixed_order_and_zeroes() {
        let e = Event {
            event: EVENT_LINK.into(),
            order: 3,
            url: "menu".into(),
            ..Default::default()
        };
        assert_eq!(
            e.all_fields(),
            "event=\"link\"&type=\"\"&text=\"\"&order=\"3\"&url=\"menu\"&referer=\"\"&media_type=\"\"&size=\"0\"&source=\"\""
        );
        assert_eq!(e.to_string(), e.all_fields());
    }

    #[test]
    fn unknown_event_is_reported_and_rendered() {
        let sink = RecordingSink::default();
        let e = Event {
            event: "sticker".into(),
            ..Default::default()
        };
        assert_eq!(e.render(&sink), e.all_fields());
        assert_eq!(
            sink.take(),
            vec![Diagnostic::UnknownEvent {
                event: "sticker".into()
            }]
        );
    }

    #[test]
    fn known_event_reports_nothing() {
        let sink = RecordingSink::default();
        let e = Event {
            event: EVENT_MESSAGE.into(),
            event_type: EVENT_TYPE_FILE.into(),
            media_type: EVENT_MEDIA_TYPE_PHOTO.into(),
            size: 2048,
            ..Default::default()
        };
        e.render(&sink);
        assert!(sink.take().is_empty());
    }

    #[test]
    fn serializes_with_wire_names() {
        let e = Event {
            event: EVENT_MESSAGE.into(),
            event_type: EVENT_TYPE_TEXT.into(),
            text: "hi".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "event": "message", "event.type": "text", "event.text": "hi" })
        );
    }
}
