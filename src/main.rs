//! Server entrypoint.

use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

use ig_media_viewer::config::Config;
use ig_media_viewer::{AppState, create_app};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before reading LOG_FORMAT or any other setting
    let _ = dotenvy::dotenv();

    let config = Config::from_env()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    let missing = config.missing_auth_settings();
    if !missing.is_empty() {
        tracing::warn!("Missing or default configuration: {}", missing.join(", "));
    }

    let http_client = config.http_client()?;
    let addr = format!("0.0.0.0:{}", config.port);
    let app = create_app(Arc::new(AppState::new(config, http_client)));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://localhost:{}", listener.local_addr()?.port());
    axum::serve(listener, app).await?;
    Ok(())
}
