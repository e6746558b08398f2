//! Sending text and pre-built blocks to users over their channel.

use std::sync::Arc;
use tracing::info;

use super::transport::Transport;
use crate::error::AppResult;
use crate::markup::{only_text_default, only_text_telegram, page};
use crate::models::user::{Protocol, User};

/// Wraps a [`Transport`] with per-channel document building.
#[derive(Clone)]
pub struct PushService {
    transport: Arc<dyn Transport>,
}

impl PushService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send freeform text; Telegram users get the double-escaped document.
    pub async fn send_message(&self, user: &User, text: &str) -> AppResult<()> {
        match user.protocol() {
            Some(p) if p.needs_double_escape() => self.send_message_telegram(user, text).await,
            _ => self.send_message_default(user, text).await,
        }
    }

    pub async fn send_message_default(&self, user: &User, text: &str) -> AppResult<()> {
        self.send(user, only_text_default(text)).await
    }

    pub async fn send_message_telegram(&self, user: &User, text: &str) -> AppResult<()> {
        self.send(user, only_text_telegram(text)).await
    }

    /// Send an already assembled `<div>` as a whole page.
    pub async fn send_message_block(&self, user: &User, div: &str) -> AppResult<()> {
        self.send(user, page("", &[div])).await
    }

    async fn send(&self, user: &User, document: String) -> AppResult<()> {
        let config = user.push_config(document);
        self.transport.push(&config).await?;
        info!(
            user = %user.key(),
            protocol = user.protocol().map(|p| p.as_str()).unwrap_or("other"),
            "message pushed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::push::PushConfig;
    use crate::models::user::{TELEGRAM, USSD};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<PushConfig>>,
        fail_with: Option<u16>,
    }

    #[async_trait]
    impl Transport for Recorder {
        async fn push(&self, config: &PushConfig) -> AppResult<()> {
            if let Some(code) = self.fail_with {
                return Err(AppError::PushStatus(code));
            }
            self.sent.lock().unwrap().push(config.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn telegram_gets_double_escaped_text() {
        let rec = Arc::new(Recorder::default());
        let svc = PushService::new(rec.clone());
        svc.send_message(&User::new(TELEGRAM, "42", "bot"), "<x>").await.unwrap();

        let sent = rec.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].document.contains("&amp;lt;x&amp;gt;"));
        assert_eq!(sent[0].protocol, TELEGRAM);
        assert_eq!(sent[0].effective_scenario(), "xmlpush");
    }

    #[tokio::test]
    async fn other_channels_get_single_escape() {
        let rec = Arc::new(Recorder::default());
        let svc = PushService::new(rec.clone());
        svc.send_message(&User::new(USSD, "1", "svc"), "<x>").await.unwrap();
        svc.send_message(&User::new("sms", "2", "svc"), "a&b").await.unwrap();

        let sent = rec.sent.lock().unwrap();
        assert!(sent[0].document.contains("<div>&lt;x&gt;</div>"));
        assert!(sent[1].document.contains("<div>a&amp;b</div>"));
    }

    #[tokio::test]
    async fn block_is_wrapped_in_page_unescaped() {
        let rec = Arc::new(Recorder::default());
        let svc = PushService::new(rec.clone());
        svc.send_message_block(&User::new(USSD, "1", "svc"), "<div><b>hi</b></div>")
            .await
            .unwrap();

        let sent = rec.sent.lock().unwrap();
        assert!(sent[0]
            .document
            .ends_with("<page version=\"2.0\"><div><b>hi</b></div></page>"));
    }

    #[tokio::test]
    async fn transport_failure_is_returned() {
        let rec = Arc::new(Recorder {
            fail_with: Some(500),
            ..Default::default()
        });
        let svc = PushService::new(rec);
        let err = svc
            .send_message(&User::new(USSD, "1", "svc"), "hi")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PushStatus(500)));
    }
}
