//! Outbound push payload.

use serde::{Deserialize, Serialize};

/// Scenario used when a push does not name one.
pub const XML_PUSH: &str = "xmlpush";

/// One push to the gateway. Built, turned into query parameters, sent once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushConfig {
    pub subscriber: String,
    pub service: String,
    /// Page markup the channel renders.
    pub document: String,
    pub scenario: String,
    pub protocol: String,
    pub resource_id: String,
    pub delay: i64,
}

impl PushConfig {
    /// `scenario`, or [`XML_PUSH`] when blank.
    pub fn effective_scenario(&self) -> &str {
        if self.scenario.is_empty() {
            XML_PUSH
        } else {
            &self.scenario
        }
    }

    /// Query parameters sent to the push endpoint, in wire order.
    pub fn to_query(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("protocol", self.protocol.as_str()),
            ("service", self.service.as_str()),
            ("scenario", self.effective_scenario()),
            ("subscriber", self.subscriber.as_str()),
            ("document", self.document.as_str()),
        ]
    }

    /// `application/x-www-form-urlencoded` rendering of [`Self::to_query`].
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_query())
            .finish()
    }
}
