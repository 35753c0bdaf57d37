//! Station store

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use super::{keys, load_json, persist_json, KeyValueBackend, StoreError};
use crate::domain::{Measurement, Station, StationStatus};

/// Holds the provisioned stations and their last-reported snapshots.
///
/// Interleaved updates for the same station are last-write-wins: the
/// whole snapshot is replaced, with no merge or version check.
pub struct StationStore {
    backend: Arc<dyn KeyValueBackend>,
    stations: RwLock<Vec<Station>>,
}

impl StationStore {
    /// Restore the persisted station set, or start empty.
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        let stations = load_json(&*backend, keys::STATIONS).unwrap_or_default();

        Self {
            backend,
            stations: RwLock::new(stations),
        }
    }

    /// Restore the persisted station set, seeding `seed` when storage
    /// holds nothing for the collection.
    pub fn with_seed(backend: Arc<dyn KeyValueBackend>, seed: Vec<Station>) -> Self {
        let stations = match load_json(&*backend, keys::STATIONS) {
            Some(stations) => stations,
            None => {
                persist_json(&*backend, keys::STATIONS, &seed);
                seed
            }
        };

        Self {
            backend,
            stations: RwLock::new(stations),
        }
    }

    pub fn list(&self) -> Vec<Station> {
        self.stations.read().clone()
    }

    pub fn get(&self, id: &str) -> Result<Station, StoreError> {
        self.stations
            .read()
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("station", id))
    }

    /// Record a new measurement snapshot with its pre-evaluated status
    /// and refreshed unacknowledged-alert count, persist, and return the
    /// updated station.
    pub fn apply_measurement(
        &self,
        id: &str,
        measurement: Measurement,
        status: StationStatus,
        alert_count: usize,
    ) -> Result<Station, StoreError> {
        self.update_station(id, |station| {
            station.last_measurement = measurement;
            station.last_update = Utc::now();
            station.status = status;
            station.alert_count = alert_count;
        })
    }

    /// Set the lifecycle status without touching the measurement
    /// snapshot. Used by the external liveness check to mark stations
    /// offline.
    pub fn set_status(&self, id: &str, status: StationStatus) -> Result<Station, StoreError> {
        self.update_station(id, |station| {
            station.status = status;
        })
    }

    /// Refresh the unacknowledged-alert count shown on the station.
    pub fn set_alert_count(&self, id: &str, alert_count: usize) -> Result<Station, StoreError> {
        self.update_station(id, |station| {
            station.alert_count = alert_count;
        })
    }

    fn update_station(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut Station),
    ) -> Result<Station, StoreError> {
        let mut stations = self.stations.write();

        let station = stations
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| StoreError::not_found("station", id))?;

        mutate(station);
        let updated = station.clone();

        persist_json(&*self.backend, keys::STATIONS, &*stations);
        Ok(updated)
    }
}
