//! Crop Advisor - Backend Server binary

use std::net::SocketAddr;

use crop_advisor_backend::{create_app, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may carry RUST_LOG, so load it before the subscriber
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "crop_advisor_server=debug,crop_advisor_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;

    tracing::info!("Starting Crop Advisor Server");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Model: {}", config.gemini.model);
    if config.gemini.api_key.is_empty() {
        tracing::warn!("No API key configured; recommendation requests will fail");
    }

    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::new(host, config.server.port);

    // Create application state
    let state = AppState::from_config(config)?;

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
