//! Entry point: load config, wire the push transport, and serve gateway callbacks.

use miniapps::config::Config;
use miniapps::services::{HttpTransport, PushService};
use miniapps::{create_app, AppError, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(AppError::from)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let transport = Arc::new(HttpTransport::new(config.push_endpoint.clone()));
    let state = AppState {
        app_key: config.app_key.clone(),
        push_service: PushService::new(transport),
    };

    let app = create_app(state);

    tracing::info!(addr = %config.server_addr, push_endpoint = %config.push_endpoint, "listening");
    let listener = tokio::net::TcpListener::bind(config.server_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
