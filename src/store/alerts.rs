//! Alert store

use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{keys, load_json, persist_json, KeyValueBackend, StoreError};
use crate::domain::{Alert, AlertCandidate};

/// Holds raised alert records.
pub struct AlertStore {
    backend: Arc<dyn KeyValueBackend>,
    alerts: RwLock<Vec<Alert>>,
}

impl AlertStore {
    /// Restore the persisted alert set, or start empty.
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        let alerts = load_json(&*backend, keys::ALERTS).unwrap_or_default();

        Self {
            backend,
            alerts: RwLock::new(alerts),
        }
    }

    /// Restore the persisted alert set, seeding `seed` when storage
    /// holds nothing for the collection.
    pub fn with_seed(backend: Arc<dyn KeyValueBackend>, seed: Vec<Alert>) -> Self {
        let alerts = match load_json(&*backend, keys::ALERTS) {
            Some(alerts) => alerts,
            None => {
                persist_json(&*backend, keys::ALERTS, &seed);
                seed
            }
        };

        Self {
            backend,
            alerts: RwLock::new(alerts),
        }
    }

    /// All alerts, newest first.
    pub fn list(&self) -> Vec<Alert> {
        let mut alerts = self.alerts.read().clone();
        alerts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        alerts
    }

    /// Turn a candidate into a persisted alert record with a fresh
    /// identity. Candidates are never deduplicated against open alerts
    /// for the same station and channel.
    pub fn raise(&self, station_id: &str, candidate: AlertCandidate) -> Alert {
        let alert = Alert {
            id: Uuid::new_v4(),
            station_id: station_id.to_string(),
            kind: candidate.kind,
            message: candidate.message,
            value: candidate.value,
            threshold: candidate.threshold,
            timestamp: Utc::now(),
            acknowledged: false,
            acknowledged_at: None,
        };

        let mut alerts = self.alerts.write();
        alerts.push(alert.clone());
        persist_json(&*self.backend, keys::ALERTS, &*alerts);

        alert
    }

    /// Mark an alert acknowledged. Idempotent: acknowledging an already
    /// acknowledged alert returns the record unchanged, keeping the
    /// original acknowledgement timestamp.
    pub fn acknowledge(&self, id: Uuid) -> Result<Alert, StoreError> {
        let mut alerts = self.alerts.write();

        let alert = alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::not_found("alert", id.to_string()))?;

        if !alert.acknowledged {
            alert.acknowledged = true;
            alert.acknowledged_at = Some(Utc::now());
            let updated = alert.clone();
            persist_json(&*self.backend, keys::ALERTS, &*alerts);
            return Ok(updated);
        }

        Ok(alert.clone())
    }

    /// Remove an alert record. The store does not require the alert to
    /// be acknowledged first; that precondition lives in the client
    /// workflow.
    pub fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut alerts = self.alerts.write();

        let before = alerts.len();
        alerts.retain(|a| a.id != id);

        if alerts.len() == before {
            return Err(StoreError::not_found("alert", id.to_string()));
        }

        persist_json(&*self.backend, keys::ALERTS, &*alerts);
        Ok(())
    }

    pub fn unacknowledged_count(&self) -> usize {
        self.alerts.read().iter().filter(|a| !a.acknowledged).count()
    }

    /// Unacknowledged alerts attributed to one station.
    pub fn unacknowledged_count_for(&self, station_id: &str) -> usize {
        self.alerts
            .read()
            .iter()
            .filter(|a| !a.acknowledged && a.station_id == station_id)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AlertKind;
    use crate::store::MemoryBackend;

    fn candidate(kind: AlertKind, value: f64, threshold: f64) -> AlertCandidate {
        AlertCandidate {
            kind,
            message: "test breach".to_string(),
            value,
            threshold,
        }
    }

    fn make_store() -> AlertStore {
        AlertStore::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_raise_assigns_identity() {
        let store = make_store();

        let a = store.raise("WELL_001", candidate(AlertKind::PhLow, 6.1, 6.5));
        let b = store.raise("WELL_001", candidate(AlertKind::PhLow, 6.1, 6.5));

        assert_ne!(a.id, b.id);
        assert!(!a.acknowledged);
        assert_eq!(store.unacknowledged_count(), 2);
    }

    #[test]
    fn test_list_is_newest_first() {
        let store = make_store();

        let first = store.raise("WELL_001", candidate(AlertKind::PhLow, 6.1, 6.5));
        let second = store.raise("WELL_002", candidate(AlertKind::Battery, 15.0, 20.0));

        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }

    #[test]
    fn test_acknowledge_is_idempotent() {
        let store = make_store();
        let alert = store.raise("WELL_001", candidate(AlertKind::Oxygen, 3.1, 4.0));

        let first = store.acknowledge(alert.id).unwrap();
        assert!(first.acknowledged);
        let first_ack_at = first.acknowledged_at.unwrap();

        let second = store.acknowledge(alert.id).unwrap();
        assert_eq!(second.acknowledged_at, Some(first_ack_at));
        assert_eq!(store.unacknowledged_count(), 0);
    }

    #[test]
    fn test_acknowledge_unknown_id_leaves_store_unchanged() {
        let store = make_store();
        store.raise("WELL_001", candidate(AlertKind::Turbidity, 8.0, 5.0));

        let result = store.acknowledge(Uuid::new_v4());
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
        assert_eq!(store.unacknowledged_count(), 1);
    }

    #[test]
    fn test_delete_does_not_require_acknowledgement() {
        let store = make_store();
        let alert = store.raise("WELL_001", candidate(AlertKind::Conductivity, 1600.0, 1500.0));

        store.delete(alert.id).unwrap();
        assert!(store.list().is_empty());

        assert!(matches!(
            store.delete(alert.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_per_station_count() {
        let store = make_store();
        store.raise("WELL_001", candidate(AlertKind::PhLow, 6.1, 6.5));
        store.raise("WELL_002", candidate(AlertKind::Battery, 15.0, 20.0));
        let acked = store.raise("WELL_002", candidate(AlertKind::Oxygen, 3.0, 4.0));
        store.acknowledge(acked.id).unwrap();

        assert_eq!(store.unacknowledged_count_for("WELL_001"), 1);
        assert_eq!(store.unacknowledged_count_for("WELL_002"), 1);
        assert_eq!(store.unacknowledged_count(), 2);
    }
}
