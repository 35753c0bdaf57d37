//! Calibration and field-report store

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{keys, load_json, persist_json, KeyValueBackend, StoreError};
use crate::domain::{CalibrationRecord, FieldReport, NewCalibration, NewFieldReport};

/// Holds calibration records and field reports.
///
/// Submissions with empty required fields are rejected; this is the
/// only validation the core performs on operator input.
pub struct CalibrationStore {
    backend: Arc<dyn KeyValueBackend>,
    calibrations: RwLock<Vec<CalibrationRecord>>,
    reports: RwLock<Vec<FieldReport>>,
}

impl CalibrationStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        let calibrations = load_json(&*backend, keys::CALIBRATIONS).unwrap_or_default();
        let reports = load_json(&*backend, keys::FIELD_REPORTS).unwrap_or_default();

        Self {
            backend,
            calibrations: RwLock::new(calibrations),
            reports: RwLock::new(reports),
        }
    }

    /// Seed both collections when storage holds nothing for them.
    pub fn with_seed(
        backend: Arc<dyn KeyValueBackend>,
        calibration_seed: Vec<CalibrationRecord>,
        report_seed: Vec<FieldReport>,
    ) -> Self {
        let calibrations = match load_json(&*backend, keys::CALIBRATIONS) {
            Some(calibrations) => calibrations,
            None => {
                persist_json(&*backend, keys::CALIBRATIONS, &calibration_seed);
                calibration_seed
            }
        };
        let reports = match load_json(&*backend, keys::FIELD_REPORTS) {
            Some(reports) => reports,
            None => {
                persist_json(&*backend, keys::FIELD_REPORTS, &report_seed);
                report_seed
            }
        };

        Self {
            backend,
            calibrations: RwLock::new(calibrations),
            reports: RwLock::new(reports),
        }
    }

    pub fn list_calibrations(&self) -> Vec<CalibrationRecord> {
        self.calibrations.read().clone()
    }

    pub fn add_calibration(
        &self,
        submission: NewCalibration,
    ) -> Result<CalibrationRecord, StoreError> {
        if submission.technician.trim().is_empty() {
            return Err(StoreError::EmptyField("technician"));
        }

        let record = CalibrationRecord {
            id: Uuid::new_v4(),
            station_id: submission.station_id,
            channel: submission.channel,
            calibrated_at: Utc::now(),
            calibration_value: submission.calibration_value,
            standard_value: submission.standard_value,
            technician: submission.technician,
            notes: submission.notes,
            next_calibration_date: submission.next_calibration_date,
        };

        let mut calibrations = self.calibrations.write();
        calibrations.push(record.clone());
        persist_json(&*self.backend, keys::CALIBRATIONS, &*calibrations);

        Ok(record)
    }

    pub fn list_reports(&self) -> Vec<FieldReport> {
        self.reports.read().clone()
    }

    pub fn add_report(&self, submission: NewFieldReport) -> Result<FieldReport, StoreError> {
        if submission.title.trim().is_empty() {
            return Err(StoreError::EmptyField("title"));
        }
        if submission.description.trim().is_empty() {
            return Err(StoreError::EmptyField("description"));
        }

        let report = FieldReport {
            id: Uuid::new_v4(),
            station_id: submission.station_id,
            reported_at: Utc::now(),
            kind: submission.kind,
            title: submission.title,
            description: submission.description,
            photos: submission.photos,
            technician: submission.technician,
            status: submission.status,
        };

        let mut reports = self.reports.write();
        reports.push(report.clone());
        persist_json(&*self.backend, keys::FIELD_REPORTS, &*reports);

        Ok(report)
    }
}
