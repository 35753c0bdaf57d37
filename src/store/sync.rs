//! Offline sync queue
//!
//! Operations recorded while the upstream backend is unreachable are
//! queued here and drained by a later push. The queue itself never
//! performs network I/O.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{keys, load_json, persist_json, KeyValueBackend, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Measurement,
    Calibration,
    FieldReport,
}

/// One operation waiting to be pushed upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueuedOperation {
    pub id: Uuid,
    pub kind: OperationKind,
    pub payload: serde_json::Value,
    pub timestamp: DateTime<Utc>,
    pub synced: bool,
}

pub struct SyncQueue {
    backend: Arc<dyn KeyValueBackend>,
    queue: RwLock<Vec<QueuedOperation>>,
}

impl SyncQueue {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        let queue = load_json(&*backend, keys::SYNC_QUEUE).unwrap_or_default();

        Self {
            backend,
            queue: RwLock::new(queue),
        }
    }

    pub fn enqueue(&self, kind: OperationKind, payload: serde_json::Value) -> QueuedOperation {
        let operation = QueuedOperation {
            id: Uuid::new_v4(),
            kind,
            payload,
            timestamp: Utc::now(),
            synced: false,
        };

        let mut queue = self.queue.write();
        queue.push(operation.clone());
        persist_json(&*self.backend, keys::SYNC_QUEUE, &*queue);

        operation
    }

    /// Operations not yet pushed upstream, oldest first.
    pub fn pending(&self) -> Vec<QueuedOperation> {
        self.queue.read().iter().filter(|op| !op.synced).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.queue.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.read().is_empty()
    }

    pub fn mark_synced(&self, id: Uuid) -> Result<(), StoreError> {
        let mut queue = self.queue.write();

        let operation = queue
            .iter_mut()
            .find(|op| op.id == id)
            .ok_or_else(|| StoreError::not_found("queued operation", id.to_string()))?;

        operation.synced = true;
        persist_json(&*self.backend, keys::SYNC_QUEUE, &*queue);
        Ok(())
    }

    /// Drop operations already pushed upstream; returns how many were
    /// removed.
    pub fn clear_synced(&self) -> usize {
        let mut queue = self.queue.write();

        let before = queue.len();
        queue.retain(|op| !op.synced);
        let removed = before - queue.len();

        if removed > 0 {
            persist_json(&*self.backend, keys::SYNC_QUEUE, &*queue);
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBackend;

    fn make_queue() -> SyncQueue {
        SyncQueue::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_enqueue_and_pending() {
        let queue = make_queue();

        queue.enqueue(
            OperationKind::Measurement,
            serde_json::json!({"station_id": "WELL_001"}),
        );
        queue.enqueue(
            OperationKind::Calibration,
            serde_json::json!({"station_id": "WELL_002"}),
        );

        assert_eq!(queue.pending().len(), 2);
        assert_eq!(queue.pending()[0].kind, OperationKind::Measurement);
    }

    #[test]
    fn test_mark_synced_and_clear() {
        let queue = make_queue();

        let op = queue.enqueue(OperationKind::FieldReport, serde_json::json!({}));
        queue.enqueue(OperationKind::Measurement, serde_json::json!({}));

        queue.mark_synced(op.id).unwrap();
        assert_eq!(queue.pending().len(), 1);

        assert_eq!(queue.clear_synced(), 1);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_mark_synced_unknown_id() {
        let queue = make_queue();
        assert!(matches!(
            queue.mark_synced(Uuid::new_v4()),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_queue_survives_reload() {
        let backend = Arc::new(MemoryBackend::new());

        let queue = SyncQueue::new(backend.clone());
        queue.enqueue(OperationKind::Measurement, serde_json::json!({"ph": 7.0}));

        let reloaded = SyncQueue::new(backend);
        assert_eq!(reloaded.len(), 1);
    }
}
