//! WaterGuard Server
//!
//! Run with: cargo run
//!
//! Environment variables:
//! - WATERGUARD_HOST: Bind address (default: 0.0.0.0)
//! - WATERGUARD_PORT: Port number (default: 8080)
//! - WATERGUARD_DATA_DIR: Persistence directory (default: ./waterguard_data)
//! - WATERGUARD_SEED: Seed demo records into empty storage (default: true)
//! - RUST_LOG: Log level (default: info)

use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use waterguard::api::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waterguard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let host = std::env::var("WATERGUARD_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("WATERGUARD_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let data_dir = std::env::var("WATERGUARD_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./waterguard_data"));
    let seed = std::env::var("WATERGUARD_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(true);

    let config = ServerConfig {
        host,
        port,
        data_dir,
        seed,
    };

    tracing::info!("WaterGuard configuration:");
    tracing::info!("  Host: {}:{}", config.host, config.port);
    tracing::info!("  Data dir: {}", config.data_dir.display());
    tracing::info!("  Seed demo data: {}", config.seed);

    run_server(config).await
}
