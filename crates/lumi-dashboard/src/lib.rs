//! Lumi Dashboard
//!
//! HTTP front end of the rule extractor: serves the Mermaid flow chart of
//! the agent's behavioral rules, workspace statistics, the heartbeat status
//! and the editable agent files, next to the static dashboard pages.

#![warn(missing_docs)]

pub mod config;
pub mod files;
pub mod handlers;
pub mod status;

use config::DashboardConfig;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Dashboard error
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the dashboard HTTP server
///
/// Serves until Ctrl-C is received.
pub async fn start_server(config: DashboardConfig) -> Result<(), DashboardError> {
    config.validate()?;

    info!("Starting Lumi Dashboard");
    info!("Bind address: {}", config.bind_addr());
    info!("Workspace: {}", config.workspace_dir.display());
    info!("Static assets: {}", config.static_path().display());
    info!("Configured agents: {}", config.agents.len());

    let bind_addr = config.bind_addr();
    let app = create_router(AppState::new(config));

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Dashboard listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| DashboardError::Server(e.to_string()))?;

    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
