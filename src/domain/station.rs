//! Station identity and lifecycle state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::measurement::Measurement;

/// Station lifecycle status.
///
/// `Online` and `Alert` are derived from the most recent evaluation;
/// `Offline` is set by an external liveness check when a station stops
/// reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationStatus {
    Online,
    Offline,
    Alert,
}

/// A provisioned monitoring well.
///
/// Stations are created at provisioning time and never deleted by the
/// core; measurements mutate the snapshot fields in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: String,
    pub name: String,
    /// Human-readable location label, e.g. "North sector".
    pub location: String,
    pub status: StationStatus,
    pub last_measurement: Measurement,
    pub last_update: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    /// Currently-unacknowledged alerts attributed to this station.
    pub alert_count: usize,
    /// Battery charge percentage, 0-100.
    pub battery: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&StationStatus::Alert).unwrap(),
            "\"alert\""
        );
        assert_eq!(
            serde_json::from_str::<StationStatus>("\"offline\"").unwrap(),
            StationStatus::Offline
        );
    }
}
