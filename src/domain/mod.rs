//! Domain value types shared across the monitoring core

pub mod alert;
pub mod calibration;
pub mod measurement;
pub mod station;
pub mod threshold;
pub mod user;

pub use alert::{Alert, AlertCandidate, AlertKind};
pub use calibration::{
    CalibrationRecord, FieldReport, NewCalibration, NewFieldReport, ReportKind, ReportStatus,
};
pub use measurement::{Channel, HistoryPoint, Measurement};
pub use station::{Station, StationStatus};
pub use threshold::{MaxBound, MinBound, RangeBounds, ThresholdConfig, ThresholdUpdate};
pub use user::{Role, User};
