//! Threshold store

use std::sync::Arc;

use parking_lot::RwLock;

use super::{keys, load_json, persist_json, KeyValueBackend};
use crate::domain::{ThresholdConfig, ThresholdUpdate};

/// Holds the single active threshold configuration.
///
/// The last-saved configuration is restored at construction; the
/// compiled-in default applies on first run.
pub struct ThresholdStore {
    backend: Arc<dyn KeyValueBackend>,
    current: RwLock<ThresholdConfig>,
}

impl ThresholdStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        let current = load_json(&*backend, keys::ALERT_THRESHOLDS).unwrap_or_default();

        Self {
            backend,
            current: RwLock::new(current),
        }
    }

    /// The active configuration.
    pub fn get(&self) -> ThresholdConfig {
        *self.current.read()
    }

    /// Shallow-merge the update into the active configuration, persist,
    /// and return the new configuration. Bounds are not validated.
    pub fn update(&self, update: ThresholdUpdate) -> ThresholdConfig {
        let mut current = self.current.write();
        *current = current.merged(update);
        persist_json(&*self.backend, keys::ALERT_THRESHOLDS, &*current);
        *current
    }

    /// Overwrite with the compiled-in default and persist.
    pub fn reset_to_default(&self) -> ThresholdConfig {
        let mut current = self.current.write();
        *current = ThresholdConfig::default();
        persist_json(&*self.backend, keys::ALERT_THRESHOLDS, &*current);
        *current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RangeBounds;
    use crate::store::MemoryBackend;

    #[test]
    fn test_first_access_returns_default() {
        let store = ThresholdStore::new(Arc::new(MemoryBackend::new()));
        assert_eq!(store.get(), ThresholdConfig::default());
    }

    #[test]
    fn test_update_persists_and_survives_reload() {
        let backend = Arc::new(MemoryBackend::new());

        let store = ThresholdStore::new(backend.clone());
        store.update(ThresholdUpdate {
            ph: Some(RangeBounds { min: 6.0, max: 9.0 }),
            ..Default::default()
        });

        let reloaded = ThresholdStore::new(backend);
        assert_eq!(reloaded.get().ph, RangeBounds { min: 6.0, max: 9.0 });
        assert_eq!(
            reloaded.get().turbidity,
            ThresholdConfig::default().turbidity
        );
    }

    #[test]
    fn test_reset_restores_default() {
        let store = ThresholdStore::new(Arc::new(MemoryBackend::new()));

        store.update(ThresholdUpdate {
            ph: Some(RangeBounds { min: 1.0, max: 2.0 }),
            ..Default::default()
        });
        assert_ne!(store.get(), ThresholdConfig::default());

        assert_eq!(store.reset_to_default(), ThresholdConfig::default());
        assert_eq!(store.get(), ThresholdConfig::default());
    }
}
