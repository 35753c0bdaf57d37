use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::{AuthError, SessionService};
use crate::domain::{
    Alert, CalibrationRecord, FieldReport, HistoryPoint, Measurement, NewCalibration,
    NewFieldReport, Station, ThresholdConfig, ThresholdUpdate, User,
};
use crate::monitor::Monitor;
use crate::store::{
    history, CalibrationStore, MeasurementSummary, OperationKind, QueuedOperation, StoreError,
};

/// Application state shared across handlers
pub struct AppState {
    pub monitor: Monitor,
    pub calibrations: CalibrationStore,
    pub sessions: SessionService,
}

// ============================================================================
// Health Check
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ============================================================================
// Measurements
// ============================================================================

#[derive(Deserialize)]
pub struct MeasurementRequest {
    pub station_id: String,
    pub measurement: Measurement,
}

#[derive(Serialize)]
pub struct MeasurementResponse {
    pub station: Station,
    pub raised_alerts: Vec<Alert>,
}

pub async fn record_measurement(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MeasurementRequest>,
) -> Result<Json<MeasurementResponse>, ApiError> {
    let outcome = state
        .monitor
        .record_measurement(&request.station_id, request.measurement)?;

    Ok(Json(MeasurementResponse {
        station: outcome.station,
        raised_alerts: outcome.raised,
    }))
}

// ============================================================================
// Stations
// ============================================================================

#[derive(Serialize)]
pub struct StationsResponse {
    pub stations: Vec<Station>,
}

pub async fn list_stations(State(state): State<Arc<AppState>>) -> Json<StationsResponse> {
    Json(StationsResponse {
        stations: state.monitor.stations().list(),
    })
}

pub async fn get_station(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Station>, ApiError> {
    Ok(Json(state.monitor.stations().get(&id)?))
}

#[derive(Deserialize)]
pub struct HistoryParams {
    /// Window in hours; defaults to the last day.
    #[serde(default = "default_window_hours")]
    pub hours: i64,
}

fn default_window_hours() -> i64 {
    24
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub station_id: String,
    pub window_hours: i64,
    pub points: Vec<HistoryPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<MeasurementSummary>,
}

pub async fn station_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    // 404 for stations that were never provisioned, not an empty series.
    state.monitor.stations().get(&id)?;

    let points = state.monitor.history().range(&id, params.hours);
    let summary = history::summary(&points);

    Ok(Json(HistoryResponse {
        station_id: id,
        window_hours: params.hours,
        points,
        summary,
    }))
}

// ============================================================================
// Alerts
// ============================================================================

#[derive(Serialize)]
pub struct AlertsResponse {
    pub alerts: Vec<Alert>,
    pub unacknowledged: usize,
}

pub async fn list_alerts(State(state): State<Arc<AppState>>) -> Json<AlertsResponse> {
    Json(AlertsResponse {
        alerts: state.monitor.alerts().list(),
        unacknowledged: state.monitor.alerts().unacknowledged_count(),
    })
}

pub async fn acknowledge_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Alert>, ApiError> {
    let alert = state.monitor.alerts().acknowledge(id)?;

    // Keep the owning station's badge in step with the store.
    let count = state
        .monitor
        .alerts()
        .unacknowledged_count_for(&alert.station_id);
    let _ = state
        .monitor
        .stations()
        .set_alert_count(&alert.station_id, count);

    Ok(Json(alert))
}

pub async fn delete_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.monitor.alerts().delete(id)?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

// ============================================================================
// Thresholds
// ============================================================================

pub async fn get_thresholds(State(state): State<Arc<AppState>>) -> Json<ThresholdConfig> {
    Json(state.monitor.thresholds().get())
}

pub async fn update_thresholds(
    State(state): State<Arc<AppState>>,
    Json(update): Json<ThresholdUpdate>,
) -> Json<ThresholdConfig> {
    Json(state.monitor.thresholds().update(update))
}

pub async fn reset_thresholds(State(state): State<Arc<AppState>>) -> Json<ThresholdConfig> {
    Json(state.monitor.thresholds().reset_to_default())
}

// ============================================================================
// Calibrations & Field Reports
// ============================================================================

#[derive(Serialize)]
pub struct CalibrationsResponse {
    pub calibrations: Vec<CalibrationRecord>,
}

pub async fn list_calibrations(State(state): State<Arc<AppState>>) -> Json<CalibrationsResponse> {
    Json(CalibrationsResponse {
        calibrations: state.calibrations.list_calibrations(),
    })
}

pub async fn add_calibration(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<NewCalibration>,
) -> Result<(StatusCode, Json<CalibrationRecord>), ApiError> {
    let record = state.calibrations.add_calibration(submission)?;

    state.monitor.sync().enqueue(
        OperationKind::Calibration,
        serde_json::to_value(&record).unwrap_or_default(),
    );

    Ok((StatusCode::CREATED, Json(record)))
}

#[derive(Serialize)]
pub struct ReportsResponse {
    pub reports: Vec<FieldReport>,
}

pub async fn list_reports(State(state): State<Arc<AppState>>) -> Json<ReportsResponse> {
    Json(ReportsResponse {
        reports: state.calibrations.list_reports(),
    })
}

pub async fn add_report(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<NewFieldReport>,
) -> Result<(StatusCode, Json<FieldReport>), ApiError> {
    let report = state.calibrations.add_report(submission)?;

    state.monitor.sync().enqueue(
        OperationKind::FieldReport,
        serde_json::to_value(&report).unwrap_or_default(),
    );

    Ok((StatusCode::CREATED, Json(report)))
}

// ============================================================================
// Sync Queue
// ============================================================================

#[derive(Serialize)]
pub struct SyncStatusResponse {
    pub pending: Vec<QueuedOperation>,
    pub total: usize,
}

pub async fn sync_status(State(state): State<Arc<AppState>>) -> Json<SyncStatusResponse> {
    Json(SyncStatusResponse {
        pending: state.monitor.sync().pending(),
        total: state.monitor.sync().len(),
    })
}

#[derive(Serialize)]
pub struct SyncFlushResponse {
    pub synced: usize,
    pub cleared: usize,
}

/// Mark every pending operation as pushed and drop it. Stands in for
/// the upstream push until a backend exists to receive the queue.
pub async fn flush_sync(State(state): State<Arc<AppState>>) -> Json<SyncFlushResponse> {
    let pending = state.monitor.sync().pending();
    let synced = pending.len();

    for operation in pending {
        let _ = state.monitor.sync().mark_synced(operation.id);
    }
    let cleared = state.monitor.sync().clear_synced();

    Json(SyncFlushResponse { synced, cleared })
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<User>, ApiError> {
    let user = state.sessions.login(&request.email, &request.password)?;
    Ok(Json(user))
}

pub async fn logout(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.sessions.logout();
    Json(serde_json::json!({ "logged_out": true }))
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub user: Option<User>,
}

pub async fn current_session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    Json(SessionResponse {
        user: state.sessions.current(),
    })
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Unauthorized(String),
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::EmptyField(_) => ApiError::BadRequest(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}
