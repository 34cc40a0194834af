// Telemetry sample domain model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidSampleError {
    #[error("{field} must be a finite number, got {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("negative power {power} W reported while energy counter advanced by {delta} J")]
    NegativePowerWithEnergy { power: f64, delta: f64 },
}

/// A single parsed reading from the power meter.
///
/// `energy` is the meter's cumulative counter in joules, not a per-sample
/// amount; deltas are derived by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    #[serde(alias = "pf")]
    pub power_factor: f64,
    #[serde(default)]
    pub frequency: f64,
    #[serde(default)]
    pub energy: f64,
}

impl Sample {
    /// Only samples drawing active power feed the aggregates; zero or
    /// negative power means the sensor is off.
    pub fn is_active(&self) -> bool {
        self.power > 0.0
    }

    /// Reject readings that would poison running sums.
    pub fn check_finite(&self) -> Result<(), InvalidSampleError> {
        let fields = [
            ("voltage", self.voltage),
            ("current", self.current),
            ("power", self.power),
            ("power_factor", self.power_factor),
            ("frequency", self.frequency),
            ("energy", self.energy),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(InvalidSampleError::NonFinite { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_at(offset_secs: i64, voltage: f64, current: f64, power: f64, energy: f64) -> Sample {
    let base = DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    Sample {
        timestamp: base + chrono::Duration::seconds(offset_secs),
        voltage,
        current,
        power,
        power_factor: 0.95,
        frequency: 50.0,
        energy,
    }
}
