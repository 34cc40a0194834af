// Rule-based load classifier
use super::sample::Sample;
use super::tier::Tier;
use serde::Deserialize;

/// Active-power boundaries in watts. A value exactly on a boundary belongs
/// to the lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub medium_above_w: f64,
    pub high_above_w: f64,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            medium_above_w: 100.0,
            high_above_w: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoadClassifier {
    thresholds: TierThresholds,
}

impl LoadClassifier {
    pub fn new(thresholds: TierThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(&self, sample: &Sample) -> Tier {
        self.classify_power(sample.power)
    }

    pub fn classify_power(&self, power: f64) -> Tier {
        if power > self.thresholds.high_above_w {
            Tier::High
        } else if power > self.thresholds.medium_above_w {
            Tier::Medium
        } else {
            Tier::Normal
        }
    }
}
