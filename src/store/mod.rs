//! Persisted collections backing the monitoring core
//!
//! Each store owns one logical collection, keeps it in memory behind a
//! lock, and writes it through to a key-value backend as JSON after
//! every mutation. Persistence failures are logged and swallowed: the
//! in-memory state stays authoritative for the process lifetime and may
//! diverge from what is on disk.

pub mod alerts;
pub mod calibrations;
pub mod file;
pub mod history;
pub mod memory;
pub mod seed;
pub mod stations;
pub mod sync;
pub mod thresholds;

pub use alerts::AlertStore;
pub use calibrations::CalibrationStore;
pub use file::FileBackend;
pub use history::{ChannelStats, HistoryStore, MeasurementSummary};
pub use memory::MemoryBackend;
pub use stations::StationStore;
pub use sync::{OperationKind, QueuedOperation, SyncQueue};
pub use thresholds::ThresholdStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Logical persistence keys.
pub mod keys {
    pub const ALERT_THRESHOLDS: &str = "alert_thresholds";
    pub const STATIONS: &str = "stations";
    pub const ALERTS: &str = "alerts";
    pub const CALIBRATIONS: &str = "calibrations";
    pub const FIELD_REPORTS: &str = "field_reports";
    pub const SYNC_QUEUE: &str = "sync_queue";
    pub const SESSION: &str = "session";

    pub fn history(station_id: &str) -> String {
        format!("history_{}", station_id)
    }
}

/// Trait for key-value persistence backends.
pub trait KeyValueBackend: Send + Sync {
    /// Read the value stored under a key, if any.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Write a value under a key, replacing any previous value.
    fn write(&self, key: &str, data: &[u8]) -> Result<(), StoreError>;

    /// Remove a key and its value.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// List all stored keys.
    fn list_keys(&self) -> Result<Vec<String>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),
}

impl StoreError {
    pub fn not_found(what: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            what,
            id: id.into(),
        }
    }
}

/// Load a persisted collection, falling back to `None` when the key is
/// absent, unreadable, or holds corrupt data. Read failures are logged,
/// never propagated: callers fall back to defaults or seed data.
pub(crate) fn load_json<T: DeserializeOwned>(backend: &dyn KeyValueBackend, key: &str) -> Option<T> {
    match backend.read(key) {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable persisted data");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read persisted data");
            None
        }
    }
}

/// Write a collection through to the backend. Failures are logged and
/// swallowed; the in-memory copy may diverge from disk afterwards.
pub(crate) fn persist_json<T: Serialize>(backend: &dyn KeyValueBackend, key: &str, value: &T) {
    let bytes = match serde_json::to_vec(value) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(key, error = %e, "Failed to serialize collection");
            return;
        }
    };

    if let Err(e) = backend.write(key, &bytes) {
        tracing::error!(key, error = %e, "Failed to persist collection; in-memory state diverges");
    }
}
