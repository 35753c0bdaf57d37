//! Measurement history store and summary statistics

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use super::{keys, load_json, persist_json, KeyValueBackend};
use crate::domain::{Channel, HistoryPoint};

/// Append-only time series of measurements, one series per station.
///
/// Series are loaded from persistence lazily, on first access per
/// station.
pub struct HistoryStore {
    backend: Arc<dyn KeyValueBackend>,
    series: RwLock<HashMap<String, Vec<HistoryPoint>>>,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn KeyValueBackend>) -> Self {
        Self {
            backend,
            series: RwLock::new(HashMap::new()),
        }
    }

    /// Append a point to a station's series and persist the series.
    pub fn append(&self, station_id: &str, point: HistoryPoint) {
        let mut series = self.series.write();
        let points = self.load_series_locked(&mut series, station_id);

        points.push(point);
        persist_json(&*self.backend, &keys::history(station_id), points);
    }

    /// Points with timestamp within the last `window_hours` hours, in
    /// chronological order. A zero-hour window is always empty.
    pub fn range(&self, station_id: &str, window_hours: i64) -> Vec<HistoryPoint> {
        if window_hours <= 0 {
            return Vec::new();
        }

        let cutoff = Utc::now() - Duration::hours(window_hours);

        let mut series = self.series.write();
        let points = self.load_series_locked(&mut series, station_id);

        points
            .iter()
            .filter(|p| p.timestamp >= cutoff)
            .copied()
            .collect()
    }

    /// Replace a station's whole series. Used by seeding.
    pub fn replace(&self, station_id: &str, points: Vec<HistoryPoint>) {
        let mut series = self.series.write();
        persist_json(&*self.backend, &keys::history(station_id), &points);
        series.insert(station_id.to_string(), points);
    }

    /// Whether any series is persisted for the station.
    pub fn is_empty(&self, station_id: &str) -> bool {
        let mut series = self.series.write();
        self.load_series_locked(&mut series, station_id).is_empty()
    }

    fn load_series_locked<'a>(
        &self,
        series: &'a mut HashMap<String, Vec<HistoryPoint>>,
        station_id: &str,
    ) -> &'a mut Vec<HistoryPoint> {
        series.entry(station_id.to_string()).or_insert_with(|| {
            load_json(&*self.backend, &keys::history(station_id)).unwrap_or_default()
        })
    }
}

/// Extrema and arithmetic mean of one channel over a window, rounded to
/// two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// Per-channel statistics over a history window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSummary {
    pub ph: ChannelStats,
    pub temperature: ChannelStats,
    pub turbidity: ChannelStats,
    pub conductivity: ChannelStats,
    pub dissolved_oxygen: ChannelStats,
}

/// Summarize a window of history points. An empty window yields no
/// summary rather than NaN statistics.
pub fn summary(points: &[HistoryPoint]) -> Option<MeasurementSummary> {
    if points.is_empty() {
        return None;
    }

    Some(MeasurementSummary {
        ph: channel_stats(points, Channel::Ph),
        temperature: channel_stats(points, Channel::Temperature),
        turbidity: channel_stats(points, Channel::Turbidity),
        conductivity: channel_stats(points, Channel::Conductivity),
        dissolved_oxygen: channel_stats(points, Channel::DissolvedOxygen),
    })
}

fn channel_stats(points: &[HistoryPoint], channel: Channel) -> ChannelStats {
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for point in points {
        let value = point.measurement.channel(channel);
        sum += value;
        min = min.min(value);
        max = max.max(value);
    }

    ChannelStats {
        avg: round2(sum / points.len() as f64),
        min: round2(min),
        max: round2(max),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Measurement;
    use crate::store::MemoryBackend;

    fn measurement(ph: f64) -> Measurement {
        Measurement {
            ph,
            temperature: 24.0,
            turbidity: 2.0,
            conductivity: 850.0,
            dissolved_oxygen: 6.8,
        }
    }

    fn point_hours_ago(hours: i64, ph: f64) -> HistoryPoint {
        HistoryPoint {
            timestamp: Utc::now() - Duration::hours(hours),
            measurement: measurement(ph),
        }
    }

    fn make_store() -> HistoryStore {
        HistoryStore::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_range_respects_window() {
        let store = make_store();
        store.append("WELL_001", point_hours_ago(30, 7.0));
        store.append("WELL_001", point_hours_ago(12, 7.1));
        store.append("WELL_001", point_hours_ago(1, 7.2));

        let points = store.range("WELL_001", 24);
        assert_eq!(points.len(), 2);
        assert!(points.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn test_zero_window_is_empty() {
        let store = make_store();
        store.append("WELL_001", point_hours_ago(1, 7.0));

        assert!(store.range("WELL_001", 0).is_empty());
    }

    #[test]
    fn test_series_survives_reload() {
        let backend = Arc::new(MemoryBackend::new());

        let store = HistoryStore::new(backend.clone());
        store.append("WELL_001", point_hours_ago(2, 7.0));
        store.append("WELL_001", point_hours_ago(1, 7.1));

        let reloaded = HistoryStore::new(backend);
        assert_eq!(reloaded.range("WELL_001", 24).len(), 2);
    }

    #[test]
    fn test_series_are_scoped_per_station() {
        let store = make_store();
        store.append("WELL_001", point_hours_ago(1, 7.0));

        assert!(store.range("WELL_002", 24).is_empty());
    }

    #[test]
    fn test_summary_of_empty_window_is_none() {
        assert!(summary(&[]).is_none());
    }

    #[test]
    fn test_summary_statistics() {
        let points = [
            point_hours_ago(3, 7.0),
            point_hours_ago(2, 7.2),
            point_hours_ago(1, 6.8),
        ];

        let stats = summary(&points).unwrap();
        assert_eq!(stats.ph.avg, 7.0);
        assert_eq!(stats.ph.min, 6.8);
        assert_eq!(stats.ph.max, 7.2);
        assert_eq!(stats.temperature.avg, 24.0);
    }
}
