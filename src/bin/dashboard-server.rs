//! Stockdash Dashboard Server
//!
//! Serves the HTML dashboard, a JSON analysis endpoint, health and metrics.
//! Each request runs the analysis pipeline from scratch; nothing is cached.

use dotenvy::dotenv;
use stockdash::config::{get_environment, Settings};
use stockdash::core::http::start_server;
use stockdash::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let settings = Settings::from_env()?;
    let port = settings.port;

    info!("Starting Stockdash Dashboard Server");
    info!(environment = %get_environment(), "Environment");
    info!(
        port = port,
        yahoo = %settings.yahoo_base_url,
        fast_window = settings.analysis.fast_window,
        slow_window = settings.analysis.slow_window,
        "Configuration loaded"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(settings).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down dashboard server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
