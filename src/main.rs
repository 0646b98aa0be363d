//! static-gate binary: configuration, logging, metrics, serve.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use static_gate::config::{self, GateConfig};
use static_gate::observability::{logging, metrics};
use static_gate::HttpServer;

/// Static/SSR front server.
#[derive(Debug, Parser)]
#[command(name = "static-gate", version)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => GateConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        trailing_slash = ?config.site.trailing_slash,
        upstream = %config.upstream.address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
