//! WaterGuard: Water-Well Monitoring Core
//!
//! A monitoring backend for a fleet of water-well stations: sensor
//! measurements flow through a threshold evaluator that raises alerts,
//! derives station status, and appends history, with every collection
//! persisted through a pluggable key-value backend.
//!
//! # Features
//!
//! - **Threshold Evaluation**: pure, per-channel breach detection over
//!   pH, temperature, turbidity, conductivity, dissolved oxygen, and
//!   battery level
//! - **Persisted Stores**: thresholds, stations, alerts, history,
//!   calibrations, and an offline sync queue, each a JSON collection
//!   behind a key-value backend
//! - **History Queries**: time-window range reads with min/avg/max
//!   summaries per channel
//! - **Session Service**: explicit login/logout lifecycle restored from
//!   persistence
//! - **HTTP API**: axum server exposing the whole core to field clients
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use waterguard::monitor::Monitor;
//! use waterguard::domain::Measurement;
//! use waterguard::store::MemoryBackend;
//!
//! let monitor = Monitor::with_seed(Arc::new(MemoryBackend::new()));
//!
//! let outcome = monitor
//!     .record_measurement(
//!         "WELL_001",
//!         Measurement {
//!             ph: 6.1,
//!             temperature: 22.0,
//!             turbidity: 1.0,
//!             conductivity: 800.0,
//!             dissolved_oxygen: 4.2,
//!         },
//!     )
//!     .unwrap();
//!
//! println!("status: {:?}, alerts: {}", outcome.station.status, outcome.raised.len());
//! ```

pub mod api;
pub mod auth;
pub mod domain;
pub mod evaluator;
pub mod monitor;
pub mod store;

// Re-export commonly used types
pub use domain::{
    Alert, AlertCandidate, AlertKind, Measurement, Station, StationStatus, ThresholdConfig,
};
pub use evaluator::{evaluate, Evaluation, LOW_BATTERY_CUTOFF};
pub use monitor::{MeasurementOutcome, Monitor};
pub use store::{KeyValueBackend, StoreError};
