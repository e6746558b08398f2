//! Client for the mini-apps messaging gateway (USSD, WAP, Telegram).
//!
//! Decodes gateway page requests into typed [`Request`] values, builds
//! markup documents with safe escaping, and pushes them back to users.

pub mod codec;
pub mod config;
pub mod error;
pub mod handlers;
pub mod markup;
pub mod models;
pub mod services;

pub use codec::{decode, decode_with};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::AppState;
pub use models::{Event, PushConfig, Request, User};
pub use services::{HttpTransport, PushService, Transport};

use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Build the router (health, push trigger, gateway fallback).
/// Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/health", get(handlers::health))
        .route("/api/push", post(handlers::push))
        .fallback(handlers::gateway)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
