//! Decoded gateway request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::event::Event;
use super::user::User;
use crate::codec::{unescape_or_raw, DiagnosticSink, TracingSink, NAMED_KEYS};

/// Query parameters as received, values still percent-encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryData(BTreeMap<String, Vec<String>>);

impl QueryData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw value; repeated keys keep every value.
    pub fn append(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(raw.into());
    }

    /// Replace all values of `key` with one raw value.
    pub fn set(&mut self, key: impl Into<String>, raw: impl Into<String>) {
        self.0.insert(key.into(), vec![raw.into()]);
    }

    /// First raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Gateway request for one page, built by [`crate::codec::decode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub request_url: String,
    #[serde(default)]
    pub data: QueryData,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub page: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subscriber: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lang: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub abonent: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scenario: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bad_command: String,
    /// Decode time, seconds since epoch. Never read from the wire.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub date: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub input_type: String,
    #[serde(flatten)]
    pub event: Event,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

impl Request {
    /// The user who sent this request.
    pub fn user(&self) -> User {
        User {
            protocol: self.protocol.clone(),
            subscriber: self.subscriber.clone(),
            service: self.service.clone(),
        }
    }

    /// Fixed-order diagnostic dump of the session fields.
    pub fn all_fields(&self) -> String {
        format!(
            "page=\"{}\"&protocol=\"{}\"&subscriber=\"{}\"&user_id=\"{}\"&service=\"{}\"&lang=\"{}\"&abonent=\"{}\"&service_id=\"{}\"&scenario=\"{}\"&input_type=\"{}\"&bad_command=\"{}\"&date=\"{}\"&request=\"{}\"",
            self.page,
            self.protocol,
            self.subscriber,
            self.user_id,
            self.service,
            self.lang,
            self.abonent,
            self.service_id,
            self.scenario,
            self.input_type,
            self.bad_command,
            self.date,
            self.request_url
        )
    }

    /// Event fields, delegated to the embedded [`Event`].
    pub fn event_fields(&self) -> String {
        self.event.all_fields()
    }

    /// Decoded value of any query parameter, `""` when absent.
    pub fn get_field(&self, key: &str) -> String {
        self.get_field_with(key, &TracingSink)
    }

    pub fn get_field_with(&self, key: &str, sink: &dyn DiagnosticSink) -> String {
        match self.data.get(key) {
            Some(raw) => unescape_or_raw(key, raw, sink),
            None => String::new(),
        }
    }

    /// Query keys with no typed field, in key order.
    pub fn ad_hoc_keys(&self) -> Vec<&str> {
        self.data.keys().filter(|k| !NAMED_KEYS.contains(k)).collect()
    }

    /// Store `value` query-escaped so later [`Self::get_field`] returns it unchanged.
    pub fn set_field(&mut self, key: &str, value: &str) {
        let escaped: String = url::form_urlencoded::byte_serialize(value.as_bytes()).collect();
        self.data.set(key, escaped);
    }

    /// [`fmt::Display`] with an explicit sink for unknown-event reports.
    pub fn render(&self, sink: &dyn DiagnosticSink) -> String {
        format!("{} {}", self.page, self.event.render(sink))
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&TracingSink))
    }
}
