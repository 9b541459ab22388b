//! finance_log - finance operation logging server
//!
//! Serves `POST /api/log_operation` and writes every reported operation to a
//! rotating log file.

use std::net::SocketAddr;

use finance_log::api;
use finance_log::logging::{self, LogFileName, LogFormat};
use finance_log::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // Initialize logging
    let mut logger_config =
        config.logger_config(LogFormat::Simple, LogFileName::Fixed("app.log".to_string()));
    logger_config.console = true;
    let logger = logging::configure(&logger_config)?;
    logger.install()?;

    tracing::info!("Starting finance_log server");
    tracing::info!("Logging to {}", logger.log_file().display());
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, api::build_router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutting down. Goodbye!");

    Ok(())
}

/// Shutdown signal handler for graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}
