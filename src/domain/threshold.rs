//! Alert threshold configuration
//!
//! Exactly one configuration is active process-wide at a time. Bounds
//! mirror what each channel can meaningfully breach: pH and temperature
//! carry a min and a max, turbidity and conductivity only a max, and
//! dissolved oxygen only a min.

use serde::{Deserialize, Serialize};

/// Two-sided bound for channels with a healthy operating band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
}

/// Upper bound only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxBound {
    pub max: f64,
}

/// Lower bound only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinBound {
    pub min: f64,
}

/// The active alert thresholds, one bound set per channel.
///
/// Submitted bounds are accepted as-is; there is no check that min ≤ max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub ph: RangeBounds,
    pub temperature: RangeBounds,
    pub turbidity: MaxBound,
    pub conductivity: MaxBound,
    pub dissolved_oxygen: MinBound,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            ph: RangeBounds { min: 6.5, max: 8.5 },
            temperature: RangeBounds { min: 15.0, max: 30.0 },
            turbidity: MaxBound { max: 5.0 },
            conductivity: MaxBound { max: 1500.0 },
            dissolved_oxygen: MinBound { min: 4.0 },
        }
    }
}

impl ThresholdConfig {
    /// Shallow-merge a partial update: channels present in the update
    /// replace their bound set wholesale, absent channels are untouched.
    pub fn merged(mut self, update: ThresholdUpdate) -> Self {
        if let Some(ph) = update.ph {
            self.ph = ph;
        }
        if let Some(temperature) = update.temperature {
            self.temperature = temperature;
        }
        if let Some(turbidity) = update.turbidity {
            self.turbidity = turbidity;
        }
        if let Some(conductivity) = update.conductivity {
            self.conductivity = conductivity;
        }
        if let Some(dissolved_oxygen) = update.dissolved_oxygen {
            self.dissolved_oxygen = dissolved_oxygen;
        }
        self
    }
}

/// Partial threshold update; `None` keeps the current bounds.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ThresholdUpdate {
    #[serde(default)]
    pub ph: Option<RangeBounds>,
    #[serde(default)]
    pub temperature: Option<RangeBounds>,
    #[serde(default)]
    pub turbidity: Option<MaxBound>,
    #[serde(default)]
    pub conductivity: Option<MaxBound>,
    #[serde(default)]
    pub dissolved_oxygen: Option<MinBound>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_touches_only_supplied_channels() {
        let update = ThresholdUpdate {
            ph: Some(RangeBounds { min: 6.0, max: 9.0 }),
            ..Default::default()
        };

        let merged = ThresholdConfig::default().merged(update);
        assert_eq!(merged.ph, RangeBounds { min: 6.0, max: 9.0 });
        assert_eq!(merged.temperature, ThresholdConfig::default().temperature);
        assert_eq!(merged.turbidity, ThresholdConfig::default().turbidity);
    }

    #[test]
    fn test_inverted_bounds_accepted() {
        // min > max is not validated; the evaluator treats the bounds
        // arithmetically as given.
        let update = ThresholdUpdate {
            temperature: Some(RangeBounds { min: 30.0, max: 15.0 }),
            ..Default::default()
        };

        let merged = ThresholdConfig::default().merged(update);
        assert_eq!(merged.temperature.min, 30.0);
        assert_eq!(merged.temperature.max, 15.0);
    }
}
