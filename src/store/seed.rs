//! Default seed records
//!
//! First-run data for deployments that want a populated demo fleet.
//! Seeding is a construction-time choice; the stores themselves only
//! read and write what they are given, so production deployments can
//! run entirely without it.

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use crate::domain::{
    Alert, AlertKind, CalibrationRecord, Channel, FieldReport, HistoryPoint, Measurement,
    ReportKind, ReportStatus, Station, StationStatus,
};

/// Hours of generated history per seeded station.
pub const HISTORY_HOURS: i64 = 72;

pub fn default_stations() -> Vec<Station> {
    let now = Utc::now();

    vec![
        Station {
            id: "WELL_001".to_string(),
            name: "Municipal Well #1".to_string(),
            location: "Town center".to_string(),
            status: StationStatus::Online,
            last_measurement: Measurement {
                ph: 7.2,
                temperature: 24.5,
                turbidity: 2.1,
                conductivity: 850.0,
                dissolved_oxygen: 6.8,
            },
            last_update: now - Duration::minutes(5),
            latitude: 3.8667,
            longitude: 11.5167,
            alert_count: 0,
            battery: 92.0,
        },
        Station {
            id: "WELL_002".to_string(),
            name: "North Well".to_string(),
            location: "North sector".to_string(),
            status: StationStatus::Alert,
            last_measurement: Measurement {
                ph: 6.1,
                temperature: 22.0,
                turbidity: 5.3,
                conductivity: 920.0,
                dissolved_oxygen: 4.2,
            },
            last_update: now - Duration::minutes(15),
            latitude: 3.9,
            longitude: 11.52,
            alert_count: 2,
            battery: 45.0,
        },
        Station {
            id: "WELL_003".to_string(),
            name: "East Well".to_string(),
            location: "East sector".to_string(),
            status: StationStatus::Online,
            last_measurement: Measurement {
                ph: 7.5,
                temperature: 25.2,
                turbidity: 1.8,
                conductivity: 780.0,
                dissolved_oxygen: 7.1,
            },
            last_update: now - Duration::minutes(2),
            latitude: 3.85,
            longitude: 11.6,
            alert_count: 0,
            battery: 87.0,
        },
        Station {
            id: "WELL_004".to_string(),
            name: "West Well".to_string(),
            location: "West sector".to_string(),
            status: StationStatus::Offline,
            last_measurement: Measurement {
                ph: 7.0,
                temperature: 23.0,
                turbidity: 2.5,
                conductivity: 810.0,
                dissolved_oxygen: 6.5,
            },
            last_update: now - Duration::hours(2),
            latitude: 3.83,
            longitude: 11.48,
            alert_count: 1,
            battery: 15.0,
        },
    ]
}

pub fn default_alerts() -> Vec<Alert> {
    let now = Utc::now();

    vec![
        Alert {
            id: Uuid::new_v4(),
            station_id: "WELL_002".to_string(),
            kind: AlertKind::PhLow,
            message: "pH too low".to_string(),
            value: 6.1,
            threshold: 6.5,
            timestamp: now - Duration::minutes(10),
            acknowledged: false,
            acknowledged_at: None,
        },
        Alert {
            id: Uuid::new_v4(),
            station_id: "WELL_002".to_string(),
            kind: AlertKind::Oxygen,
            message: "Dissolved oxygen too low".to_string(),
            value: 4.2,
            threshold: 5.0,
            timestamp: now - Duration::minutes(25),
            acknowledged: false,
            acknowledged_at: None,
        },
        Alert {
            id: Uuid::new_v4(),
            station_id: "WELL_004".to_string(),
            kind: AlertKind::Battery,
            message: "Battery low".to_string(),
            value: 15.0,
            threshold: 20.0,
            timestamp: now - Duration::hours(2),
            acknowledged: true,
            acknowledged_at: Some(now - Duration::minutes(30)),
        },
    ]
}

pub fn default_calibrations() -> Vec<CalibrationRecord> {
    let now = Utc::now();

    vec![CalibrationRecord {
        id: Uuid::new_v4(),
        station_id: "WELL_001".to_string(),
        channel: Channel::Ph,
        calibrated_at: now - Duration::days(7),
        calibration_value: 7.0,
        standard_value: 7.0,
        technician: "J. Dupont".to_string(),
        notes: "Two-point calibration against 7.0 and 10.0 standards".to_string(),
        next_calibration_date: now + Duration::days(23),
    }]
}

pub fn default_reports() -> Vec<FieldReport> {
    let now = Utc::now();

    vec![FieldReport {
        id: Uuid::new_v4(),
        station_id: "WELL_001".to_string(),
        reported_at: now - Duration::days(2),
        kind: ReportKind::Maintenance,
        title: "Preventive maintenance".to_string(),
        description: "Sensor heads cleaned; all channels reading within range.".to_string(),
        photos: Vec::new(),
        technician: "J. Dupont".to_string(),
        status: ReportStatus::Completed,
    }]
}

/// Generate an hourly history series around a station's last snapshot,
/// jittered so charts have some texture.
pub fn generate_history(base: &Measurement) -> Vec<HistoryPoint> {
    let now = Utc::now();
    let mut rng = rand::thread_rng();
    let mut points = Vec::with_capacity(HISTORY_HOURS as usize + 1);

    for hours_ago in (0..=HISTORY_HOURS).rev() {
        points.push(HistoryPoint {
            timestamp: now - Duration::hours(hours_ago),
            measurement: Measurement {
                ph: base.ph + rng.gen_range(-0.3..0.3),
                temperature: base.temperature + rng.gen_range(-1.5..1.5),
                turbidity: (base.turbidity + rng.gen_range(-1.0..1.0)).max(0.0),
                conductivity: base.conductivity + rng.gen_range(-50.0..50.0),
                dissolved_oxygen: (base.dissolved_oxygen + rng.gen_range(-0.5..0.5)).max(0.0),
            },
        });
    }

    points
}
