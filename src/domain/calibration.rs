//! Calibration records and field reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::measurement::Channel;

/// A completed sensor calibration against a standard solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    pub id: Uuid,
    pub station_id: String,
    pub channel: Channel,
    pub calibrated_at: DateTime<Utc>,
    /// Reading observed during calibration.
    pub calibration_value: f64,
    /// Reference value of the standard used.
    pub standard_value: f64,
    pub technician: String,
    pub notes: String,
    pub next_calibration_date: DateTime<Utc>,
}

/// Calibration submission; identity and timestamp are assigned on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCalibration {
    pub station_id: String,
    pub channel: Channel,
    pub calibration_value: f64,
    pub standard_value: f64,
    pub technician: String,
    #[serde(default)]
    pub notes: String,
    pub next_calibration_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Maintenance,
    Repair,
    Inspection,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Completed,
}

/// A field technician's report filed against a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldReport {
    pub id: Uuid,
    pub station_id: String,
    pub reported_at: DateTime<Utc>,
    pub kind: ReportKind,
    pub title: String,
    pub description: String,
    /// References to uploaded photos (paths or URLs).
    pub photos: Vec<String>,
    pub technician: String,
    pub status: ReportStatus,
}

/// Field report submission; identity and timestamp are assigned on insert.
#[derive(Debug, Clone, Deserialize)]
pub struct NewFieldReport {
    pub station_id: String,
    pub kind: ReportKind,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub photos: Vec<String>,
    pub technician: String,
    #[serde(default = "default_report_status")]
    pub status: ReportStatus,
}

fn default_report_status() -> ReportStatus {
    ReportStatus::Pending
}
