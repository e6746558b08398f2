//! Push transport: one GET to the gateway push endpoint per document.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::error::{AppError, AppResult};
use crate::models::push::PushConfig;

/// Delivers a push to the gateway. Success means the gateway accepted it.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn push(&self, config: &PushConfig) -> AppResult<()>;
}

/// HTTP transport: `GET <endpoint>?protocol=..&service=..&scenario=..&subscriber=..&document=..`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn push(&self, config: &PushConfig) -> AppResult<()> {
        let res = self
            .client
            .get(self.endpoint.clone())
            .query(&config.to_query())
            .send()
            .await?;

        let status = res.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), subscriber = %config.subscriber, "push rejected");
            return Err(AppError::PushStatus(status.as_u16()));
        }
        debug!(protocol = %config.protocol, subscriber = %config.subscriber, "pushed");
        Ok(())
    }
}
