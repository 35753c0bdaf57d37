//! Alert records and evaluator candidates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which breach raised the alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    PhLow,
    PhHigh,
    Temperature,
    Turbidity,
    Conductivity,
    Oxygen,
    Battery,
}

/// A potential alert produced by the evaluator, before it is persisted
/// and assigned an identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertCandidate {
    pub kind: AlertKind,
    pub message: String,
    /// The reading that breached.
    pub value: f64,
    /// The bound it breached.
    pub threshold: f64,
}

/// A raised alert record.
///
/// Mutated only by acknowledge (one-way flag plus timestamp) or delete;
/// repeated breaches create independent records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub station_id: String,
    pub kind: AlertKind,
    pub message: String,
    pub value: f64,
    pub threshold: f64,
    pub timestamp: DateTime<Utc>,
    pub acknowledged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledged_at: Option<DateTime<Utc>>,
}
