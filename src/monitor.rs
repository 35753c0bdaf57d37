//! Measurement ingest pipeline
//!
//! Wires the synchronous data flow: new measurement → evaluator (reads
//! the threshold store) → alert store (appends) → station store (status
//! update) → history store (appends a point). No component here does
//! network I/O or background scheduling.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Alert, HistoryPoint, Measurement, Station, StationStatus};
use crate::evaluator::evaluate;
use crate::store::{
    seed, AlertStore, HistoryStore, KeyValueBackend, OperationKind, StationStore, StoreError,
    SyncQueue, ThresholdStore,
};

/// Result of recording one measurement.
#[derive(Debug, Clone)]
pub struct MeasurementOutcome {
    pub station: Station,
    /// Alerts raised by this sample, in channel order.
    pub raised: Vec<Alert>,
}

/// Owns the persisted stores and runs the evaluation pipeline.
pub struct Monitor {
    thresholds: ThresholdStore,
    stations: StationStore,
    alerts: AlertStore,
    history: HistoryStore,
    sync: SyncQueue,
}

impl Monitor {
    /// Open the stores without seeding; empty storage stays empty.
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self {
            thresholds: ThresholdStore::new(backend.clone()),
            stations: StationStore::new(backend.clone()),
            alerts: AlertStore::new(backend.clone()),
            history: HistoryStore::new(backend.clone()),
            sync: SyncQueue::new(backend),
        }
    }

    /// Open the stores, seeding demo records into any collection that
    /// has nothing persisted yet.
    pub fn with_seed(backend: Arc<dyn KeyValueBackend>) -> Self {
        let stations = StationStore::with_seed(backend.clone(), seed::default_stations());
        let alerts = AlertStore::with_seed(backend.clone(), seed::default_alerts());
        let history = HistoryStore::new(backend.clone());

        for station in stations.list() {
            if history.is_empty(&station.id) {
                history.replace(&station.id, seed::generate_history(&station.last_measurement));
            }
        }

        Self {
            thresholds: ThresholdStore::new(backend.clone()),
            stations,
            alerts,
            history,
            sync: SyncQueue::new(backend),
        }
    }

    /// Run one measurement through the pipeline and return the updated
    /// station with whatever alerts the sample raised.
    pub fn record_measurement(
        &self,
        station_id: &str,
        measurement: Measurement,
    ) -> Result<MeasurementOutcome, StoreError> {
        let station = self.stations.get(station_id)?;

        let evaluation = evaluate(&measurement, &self.thresholds.get(), station.battery);

        let raised: Vec<Alert> = evaluation
            .candidates
            .into_iter()
            .map(|candidate| self.alerts.raise(station_id, candidate))
            .collect();

        if !raised.is_empty() {
            tracing::info!(
                station_id,
                raised = raised.len(),
                "Measurement breached thresholds"
            );
        }

        let alert_count = self.alerts.unacknowledged_count_for(station_id);
        let station = self.stations.apply_measurement(
            station_id,
            measurement,
            evaluation.status,
            alert_count,
        )?;

        self.history.append(
            station_id,
            HistoryPoint {
                timestamp: Utc::now(),
                measurement,
            },
        );

        self.sync.enqueue(
            OperationKind::Measurement,
            serde_json::json!({
                "station_id": station_id,
                "measurement": measurement,
            }),
        );

        Ok(MeasurementOutcome { station, raised })
    }

    /// Hook for the external liveness check: mark a silent station
    /// offline without touching its snapshot.
    pub fn mark_offline(&self, station_id: &str) -> Result<Station, StoreError> {
        self.stations.set_status(station_id, StationStatus::Offline)
    }

    pub fn thresholds(&self) -> &ThresholdStore {
        &self.thresholds
    }

    pub fn stations(&self) -> &StationStore {
        &self.stations
    }

    pub fn alerts(&self) -> &AlertStore {
        &self.alerts
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn sync(&self) -> &SyncQueue {
        &self.sync
    }
}
