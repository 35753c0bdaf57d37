//! Sensor measurement types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One measured quantity on a station's sensor head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Ph,
    Temperature,
    Turbidity,
    Conductivity,
    DissolvedOxygen,
}

/// A complete snapshot of the five channel readings.
///
/// Always complete: a station reports all channels in one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub ph: f64,
    /// Water temperature in °C.
    pub temperature: f64,
    /// Turbidity in NTU.
    pub turbidity: f64,
    /// Conductivity in µS/cm.
    pub conductivity: f64,
    /// Dissolved oxygen in mg/L.
    pub dissolved_oxygen: f64,
}

impl Measurement {
    /// Read a single channel out of the snapshot.
    pub fn channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Ph => self.ph,
            Channel::Temperature => self.temperature,
            Channel::Turbidity => self.turbidity,
            Channel::Conductivity => self.conductivity,
            Channel::DissolvedOxygen => self.dissolved_oxygen,
        }
    }
}

/// A timestamped measurement in a station's history series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub measurement: Measurement,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_accessor() {
        let m = Measurement {
            ph: 7.2,
            temperature: 24.5,
            turbidity: 2.1,
            conductivity: 850.0,
            dissolved_oxygen: 6.8,
        };

        assert_eq!(m.channel(Channel::Ph), 7.2);
        assert_eq!(m.channel(Channel::Conductivity), 850.0);
    }

    #[test]
    fn test_channel_serde_names() {
        let json = serde_json::to_string(&Channel::DissolvedOxygen).unwrap();
        assert_eq!(json, "\"dissolved_oxygen\"");
    }
}
