mod app;
mod config;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::logging::LoggingConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    // Initialize logging FIRST
    logging::init_logging(LoggingConfig::from_env(&config.environment))?;

    let state = AppState::from_config(&config).context("failed to build upstream clients")?;
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(
        "/dev/reno backend running at http://{}/ ({})",
        addr,
        config.environment
    );

    axum::serve(listener, app).await?;

    Ok(())
}
