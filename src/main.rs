use std::sync::Arc;

use anyhow::Context;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gemini_chat::{config::AppConfig, routes, state::AppState};

const DEFAULT_LOG_FILTER: &str = "gemini_chat=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    info!(model = %config.gemini.model, "configuration loaded");

    let state = Arc::new(AppState::from_config(&config));

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router(state.clone())
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!("gemini chat running at http://{}", config.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
