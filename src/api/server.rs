use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    acknowledge_alert, add_calibration, add_report, current_session, delete_alert, flush_sync,
    get_station, get_thresholds, health_check, list_alerts, list_calibrations, list_reports,
    list_stations, login, logout, record_measurement, reset_thresholds, station_history,
    sync_status, update_thresholds, AppState,
};
use crate::auth::SessionService;
use crate::monitor::Monitor;
use crate::store::{CalibrationStore, FileBackend, KeyValueBackend};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Seed demo records into empty storage at startup.
    pub seed: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: PathBuf::from("./waterguard_data"),
            seed: true,
        }
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Measurements
        .route("/measurements", post(record_measurement))
        // Stations
        .route("/stations", get(list_stations))
        .route("/stations/:id", get(get_station))
        .route("/stations/:id/history", get(station_history))
        // Alerts
        .route("/alerts", get(list_alerts))
        .route("/alerts/:id/acknowledge", post(acknowledge_alert))
        .route("/alerts/:id", delete(delete_alert))
        // Thresholds
        .route("/thresholds", get(get_thresholds))
        .route("/thresholds", patch(update_thresholds))
        .route("/thresholds/reset", post(reset_thresholds))
        // Calibrations & field reports
        .route("/calibrations", get(list_calibrations))
        .route("/calibrations", post(add_calibration))
        .route("/reports", get(list_reports))
        .route("/reports", post(add_report))
        // Sync queue
        .route("/sync", get(sync_status))
        .route("/sync/flush", post(flush_sync))
        // Auth
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/session", get(current_session))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Assemble the shared state over a backend.
pub fn build_state(backend: Arc<dyn KeyValueBackend>, seed: bool) -> Arc<AppState> {
    let monitor = if seed {
        Monitor::with_seed(backend.clone())
    } else {
        Monitor::new(backend.clone())
    };

    let calibrations = if seed {
        CalibrationStore::with_seed(
            backend.clone(),
            crate::store::seed::default_calibrations(),
            crate::store::seed::default_reports(),
        )
    } else {
        CalibrationStore::new(backend.clone())
    };

    Arc::new(AppState {
        monitor,
        calibrations,
        sessions: SessionService::new(backend),
    })
}

/// Run the HTTP server
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let backend: Arc<dyn KeyValueBackend> = Arc::new(FileBackend::new(&config.data_dir)?);

    let state = build_state(backend, config.seed);

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Starting WaterGuard server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("WaterGuard server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");

    tracing::info!("Shutdown signal received");
}
