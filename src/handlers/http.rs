//! HTTP handlers: gateway page requests, push trigger and health.

use axum::{
    extract::State,
    http::{
        header::{CONTENT_TYPE, HOST},
        HeaderMap, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::codec::{self, TracingSink};
use crate::error::AppError;
use crate::markup::{attr_protocol, div, escape, page, title, EscapePolicy};
use crate::models::request::Request;
use crate::models::user::User;
use crate::services::PushService;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub app_key: String,
    pub push_service: PushService,
}

impl AppState {
    pub fn push_service(&self) -> &PushService {
        &self.push_service
    }
}

const HEADER_APP_KEY: &str = "x-app-key";
const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Body of `POST /api/push`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushMessage {
    pub protocol: String,
    pub subscriber: String,
    #[serde(default)]
    pub service: String,
    pub text: String,
}

/// Any page the gateway requests. The URL is decoded and answered with a page document.
pub async fn gateway(headers: HeaderMap, uri: Uri) -> Result<Response, AppError> {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let raw_url = format!("http://{}{}", host, uri);
    let request = codec::decode(&raw_url)?;

    info!(fields = %request.all_fields(), "gateway request");
    info!(event = %request.event, "gateway event");
    let extra = request.ad_hoc_keys();
    if !extra.is_empty() {
        debug!(keys = ?extra, "ad hoc query keys");
    }

    Ok(([(CONTENT_TYPE, XML_CONTENT_TYPE)], acknowledge(&request)).into_response())
}

/// Page echoing what was requested.
fn acknowledge(request: &Request) -> String {
    let args = if request.protocol.is_empty() {
        String::new()
    } else {
        attr_protocol(&escape(&request.protocol, EscapePolicy::Default))
    };
    let name = if request.page.is_empty() {
        "index"
    } else {
        request.page.as_str()
    };
    let rendered = request.render(&TracingSink);
    page(
        &args,
        &[
            &title("", &[&escape(name, EscapePolicy::Default)]),
            &div("", &[&escape(&rendered, EscapePolicy::YesBr)]),
        ],
    )
}

/// POST /api/push — send text to one user. Requires `x-app-key`.
pub async fn push(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<PushMessage>,
) -> Result<Json<serde_json::Value>, AppError> {
    let key = headers
        .get(HEADER_APP_KEY)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if key.is_empty() || key != state.app_key {
        return Err(AppError::Auth("invalid or missing x-app-key".to_string()));
    }
    if body.protocol.is_empty() || body.subscriber.is_empty() {
        return Err(AppError::Validation(
            "protocol and subscriber are required".to_string(),
        ));
    }

    let user = User::new(body.protocol, body.subscriber, body.service);
    state.push_service().send_message(&user, &body.text).await?;

    Ok(Json(json!({ "ok": true, "key": user.key() })))
}

/// GET /health — liveness check.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "miniapps" })),
    )
}
