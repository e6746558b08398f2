//! Gateway users and channel protocols.

use serde::{Deserialize, Serialize};

use super::push::PushConfig;

pub const USSD: &str = "ussd";
pub const TELEGRAM: &str = "telegram";
pub const WAP: &str = "wap";

/// Channel a user is reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Protocol {
    Ussd,
    Telegram,
    Wap,
}

impl Protocol {
    /// Parse a wire protocol name; `None` for channels this crate has no special handling for.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            USSD => Some(Protocol::Ussd),
            TELEGRAM => Some(Protocol::Telegram),
            WAP => Some(Protocol::Wap),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Ussd => USSD,
            Protocol::Telegram => TELEGRAM,
            Protocol::Wap => WAP,
        }
    }

    /// Telegram renders markup once more, so text pushed there is escaped twice.
    pub fn needs_double_escape(&self) -> bool {
        matches!(self, Protocol::Telegram)
    }
}

/// Identity of a subscriber on one channel of one service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subscriber: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub protocol: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service: String,
}

impl User {
    pub fn new(
        protocol: impl Into<String>,
        subscriber: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            subscriber: subscriber.into(),
            service: service.into(),
        }
    }

    /// Dedup key: `protocol=subscriber`. Service is not part of it.
    pub fn key(&self) -> String {
        format!("{}={}", self.protocol, self.subscriber)
    }

    pub fn protocol(&self) -> Option<Protocol> {
        Protocol::from_name(&self.protocol)
    }

    /// Push addressed to this user with the default scenario.
    pub fn push_config(&self, document: String) -> PushConfig {
        PushConfig {
            service: self.service.clone(),
            protocol: self.protocol.clone(),
            subscriber: self.subscriber.clone(),
            document,
            ..Default::default()
        }
    }
}
