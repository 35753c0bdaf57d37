//! Threshold evaluation
//!
//! The one pure decision function in the core: given a measurement
//! snapshot, the active thresholds, and the station's battery level,
//! produce the alert candidates and the station's derived status.
//!
//! Evaluation never fails. Values are compared arithmetically as given;
//! NaN readings compare false against every bound and so never breach.
//! Every breach emits a fresh candidate regardless of any open alert
//! for the same station and channel — deduplication is intentionally
//! not performed here, so sustained breaches produce one record per
//! sample.

use crate::domain::{AlertCandidate, AlertKind, Measurement, StationStatus, ThresholdConfig};

/// Battery percentage below which a battery alert is raised.
pub const LOW_BATTERY_CUTOFF: f64 = 20.0;

/// Outcome of evaluating one measurement snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Alert candidates in channel order: pH low, pH high, temperature,
    /// turbidity, conductivity, oxygen, battery.
    pub candidates: Vec<AlertCandidate>,
    /// `Alert` if any candidate was emitted, `Online` otherwise. The
    /// `Offline` status is owned by the external liveness check and is
    /// never produced here.
    pub status: StationStatus,
}

/// Evaluate a measurement against the active thresholds.
pub fn evaluate(
    measurement: &Measurement,
    thresholds: &ThresholdConfig,
    battery: f64,
) -> Evaluation {
    let mut candidates = Vec::new();

    if measurement.ph < thresholds.ph.min {
        candidates.push(candidate(
            AlertKind::PhLow,
            "pH too low",
            measurement.ph,
            thresholds.ph.min,
        ));
    } else if measurement.ph > thresholds.ph.max {
        // else-branch keeps inverted bounds (min > max) from emitting
        // both pH candidates for one sample
        candidates.push(candidate(
            AlertKind::PhHigh,
            "pH too high",
            measurement.ph,
            thresholds.ph.max,
        ));
    }

    if measurement.temperature > thresholds.temperature.max {
        candidates.push(candidate(
            AlertKind::Temperature,
            "Temperature out of range",
            measurement.temperature,
            thresholds.temperature.max,
        ));
    } else if measurement.temperature < thresholds.temperature.min {
        candidates.push(candidate(
            AlertKind::Temperature,
            "Temperature out of range",
            measurement.temperature,
            thresholds.temperature.min,
        ));
    }

    if measurement.turbidity > thresholds.turbidity.max {
        candidates.push(candidate(
            AlertKind::Turbidity,
            "Turbidity too high",
            measurement.turbidity,
            thresholds.turbidity.max,
        ));
    }

    if measurement.conductivity > thresholds.conductivity.max {
        candidates.push(candidate(
            AlertKind::Conductivity,
            "Conductivity too high",
            measurement.conductivity,
            thresholds.conductivity.max,
        ));
    }

    if measurement.dissolved_oxygen < thresholds.dissolved_oxygen.min {
        candidates.push(candidate(
            AlertKind::Oxygen,
            "Dissolved oxygen too low",
            measurement.dissolved_oxygen,
            thresholds.dissolved_oxygen.min,
        ));
    }

    if battery < LOW_BATTERY_CUTOFF {
        candidates.push(candidate(
            AlertKind::Battery,
            "Battery low",
            battery,
            LOW_BATTERY_CUTOFF,
        ));
    }

    let status = if candidates.is_empty() {
        StationStatus::Online
    } else {
        StationStatus::Alert
    };

    Evaluation { candidates, status }
}

fn candidate(kind: AlertKind, message: &str, value: f64, threshold: f64) -> AlertCandidate {
    AlertCandidate {
        kind,
        message: message.to_string(),
        value,
        threshold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RangeBounds;

    fn nominal() -> Measurement {
        Measurement {
            ph: 7.2,
            temperature: 22.0,
            turbidity: 1.0,
            conductivity: 800.0,
            dissolved_oxygen: 6.5,
        }
    }

    #[test]
    fn test_nominal_measurement_is_online() {
        let eval = evaluate(&nominal(), &ThresholdConfig::default(), 92.0);
        assert!(eval.candidates.is_empty());
        assert_eq!(eval.status, StationStatus::Online);
    }

    #[test]
    fn test_low_ph_emits_single_candidate() {
        let m = Measurement {
            ph: 6.1,
            dissolved_oxygen: 4.2,
            ..nominal()
        };
        let eval = evaluate(&m, &ThresholdConfig::default(), 92.0);

        assert_eq!(eval.candidates.len(), 1);
        let c = &eval.candidates[0];
        assert_eq!(c.kind, AlertKind::PhLow);
        assert_eq!(c.value, 6.1);
        assert_eq!(c.threshold, 6.5);
        assert_eq!(eval.status, StationStatus::Alert);
    }

    #[test]
    fn test_low_battery_alone_triggers_alert() {
        let eval = evaluate(&nominal(), &ThresholdConfig::default(), 15.0);

        assert_eq!(eval.candidates.len(), 1);
        let c = &eval.candidates[0];
        assert_eq!(c.kind, AlertKind::Battery);
        assert_eq!(c.value, 15.0);
        assert_eq!(c.threshold, 20.0);
        assert_eq!(eval.status, StationStatus::Alert);
    }

    #[test]
    fn test_temperature_reports_breached_bound() {
        let hot = Measurement {
            temperature: 34.0,
            ..nominal()
        };
        let eval = evaluate(&hot, &ThresholdConfig::default(), 92.0);
        assert_eq!(eval.candidates[0].kind, AlertKind::Temperature);
        assert_eq!(eval.candidates[0].threshold, 30.0);

        let cold = Measurement {
            temperature: 10.0,
            ..nominal()
        };
        let eval = evaluate(&cold, &ThresholdConfig::default(), 92.0);
        assert_eq!(eval.candidates[0].threshold, 15.0);
    }

    #[test]
    fn test_multiple_breaches_emit_in_channel_order() {
        let m = Measurement {
            ph: 9.4,
            turbidity: 8.0,
            dissolved_oxygen: 2.0,
            ..nominal()
        };
        let eval = evaluate(&m, &ThresholdConfig::default(), 10.0);

        let kinds: Vec<AlertKind> = eval.candidates.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AlertKind::PhHigh,
                AlertKind::Turbidity,
                AlertKind::Oxygen,
                AlertKind::Battery,
            ]
        );
    }

    #[test]
    fn test_never_both_ph_candidates_for_one_sample() {
        // Inverted bounds make both comparisons true; only the low side
        // may fire.
        let thresholds = ThresholdConfig {
            ph: RangeBounds { min: 8.0, max: 6.0 },
            ..ThresholdConfig::default()
        };
        let eval = evaluate(&nominal(), &thresholds, 92.0);

        let ph_kinds: Vec<AlertKind> = eval
            .candidates
            .iter()
            .filter(|c| matches!(c.kind, AlertKind::PhLow | AlertKind::PhHigh))
            .map(|c| c.kind)
            .collect();
        assert_eq!(ph_kinds, vec![AlertKind::PhLow]);
    }

    #[test]
    fn test_nan_reading_never_breaches() {
        let m = Measurement {
            ph: f64::NAN,
            ..nominal()
        };
        let eval = evaluate(&m, &ThresholdConfig::default(), 92.0);
        assert!(eval.candidates.is_empty());
        assert_eq!(eval.status, StationStatus::Online);
    }

    #[test]
    fn test_value_on_bound_does_not_breach() {
        let m = Measurement {
            ph: 6.5,
            turbidity: 5.0,
            ..nominal()
        };
        let eval = evaluate(&m, &ThresholdConfig::default(), 20.0);
        assert!(eval.candidates.is_empty());
    }
}
