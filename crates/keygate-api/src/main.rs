//! # keygate — Binary Entry Point
//!
//! Loads configuration, captures the expected API key, and starts the
//! Axum HTTP server (default port 8080).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use keygate_api::config::{AppConfig, Overrides};
use keygate_api::state::AppState;

/// API key authenticated HTTP service.
#[derive(Parser, Debug)]
#[command(name = "keygate", version, about)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, env = "KEYGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Port to listen on. Overrides the config file.
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Emit logs as JSON lines.
    #[arg(long, env = "KEYGATE_LOG_JSON")]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize structured tracing.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    // The key comes from the environment only, never from argv.
    let overrides = Overrides {
        api_key: std::env::var("KEYGATE_API_KEY").ok(),
        port: cli.port,
    };

    let config = AppConfig::load(cli.config.as_deref(), overrides).map_err(|e| {
        tracing::error!("Configuration failed: {e}");
        e
    })?;
    tracing::info!(
        header = %config.auth.header_name,
        query_param = ?config.auth.query_param,
        "API key authentication configured"
    );

    let state = AppState::from_config(&config).context("invalid API key")?;
    let app = keygate_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("keygate listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("keygate stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
