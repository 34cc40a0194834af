// Alert rules and display severity, independent of load tiers
use super::sample::Sample;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub voltage_min: f64,
    pub voltage_max: f64,
    pub pf_min: f64,
    pub current_max: f64,
    pub power_max: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            voltage_min: 200.0,
            voltage_max: 230.0,
            pf_min: 0.7,
            current_max: 10.0,
            power_max: 600.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alert {
    VoltageOutOfBand,
    LowPowerFactor,
    Overcurrent,
    HighConsumption,
}

impl Alert {
    pub fn severity(self) -> Severity {
        match self {
            Alert::VoltageOutOfBand | Alert::LowPowerFactor => Severity::Warning,
            Alert::Overcurrent | Alert::HighConsumption => Severity::Danger,
        }
    }
}

/// Per-metric severity used by gauges for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricSeverity {
    pub voltage: Severity,
    pub current: Severity,
    pub power: Severity,
    pub power_factor: Severity,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlertRules {
    thresholds: AlertThresholds,
}

impl AlertRules {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    /// Alerts raised by a reading, in a fixed order.
    pub fn assess(&self, sample: &Sample) -> Vec<Alert> {
        let t = &self.thresholds;
        let mut alerts = Vec::new();

        if sample.power > t.power_max {
            alerts.push(Alert::HighConsumption);
        }
        if sample.voltage < t.voltage_min || sample.voltage > t.voltage_max {
            alerts.push(Alert::VoltageOutOfBand);
        }
        if sample.power_factor < t.pf_min {
            alerts.push(Alert::LowPowerFactor);
        }
        if sample.current > t.current_max {
            alerts.push(Alert::Overcurrent);
        }

        alerts
    }

    pub fn severity(&self, alerts: &[Alert]) -> MetricSeverity {
        let mut severity = MetricSeverity::default();
        for alert in alerts {
            let slot = match alert {
                Alert::VoltageOutOfBand => &mut severity.voltage,
                Alert::LowPowerFactor => &mut severity.power_factor,
                Alert::Overcurrent => &mut severity.current,
                Alert::HighConsumption => &mut severity.power,
            };
            *slot = (*slot).max(alert.severity());
        }
        severity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::sample_at;

    #[test]
    fn test_nominal_reading_has_no_alerts() {
        let rules = AlertRules::default();
        let sample = sample_at(0, 220.0, 1.0, 50.0, 0.0);
        assert!(rules.assess(&sample).is_empty());
        assert_eq!(rules.severity(&[]), MetricSeverity::default());
    }

    #[test]
    fn test_voltage_band_is_exclusive() {
        let rules = AlertRules::default();
        assert!(rules.assess(&sample_at(0, 200.0, 1.0, 50.0, 0.0)).is_empty());
        assert!(rules.assess(&sample_at(0, 230.0, 1.0, 50.0, 0.0)).is_empty());
        assert_eq!(
            rules.assess(&sample_at(0, 199.9, 1.0, 50.0, 0.0)),
            vec![Alert::VoltageOutOfBand]
        );
        assert_eq!(
            rules.assess(&sample_at(0, 230.1, 1.0, 50.0, 0.0)),
            vec![Alert::VoltageOutOfBand]
        );
    }

    #[test]
    fn test_overcurrent_is_danger() {
        let rules = AlertRules::default();
        let alerts = rules.assess(&sample_at(0, 220.0, 15.0, 500.0, 0.0));
        assert_eq!(alerts, vec![Alert::Overcurrent]);

        let severity = rules.severity(&alerts);
        assert_eq!(severity.current, Severity::Danger);
        assert_eq!(severity.voltage, Severity::Normal);
    }

    #[test]
    fn test_low_power_factor_warning() {
        let rules = AlertRules::default();
        let mut sample = sample_at(0, 220.0, 1.0, 50.0, 0.0);
        sample.power_factor = 0.65;

        let alerts = rules.assess(&sample);
        assert_eq!(alerts, vec![Alert::LowPowerFactor]);
        assert_eq!(rules.severity(&alerts).power_factor, Severity::Warning);
    }

    #[test]
    fn test_high_consumption_does_not_depend_on_tier_thresholds() {
        let rules = AlertRules::new(AlertThresholds {
            power_max: 1000.0,
            ..AlertThresholds::default()
        });
        assert!(rules.assess(&sample_at(0, 220.0, 3.0, 800.0, 0.0)).is_empty());
        assert_eq!(
            rules.assess(&sample_at(0, 220.0, 5.0, 1200.0, 0.0)),
            vec![Alert::HighConsumption]
        );
    }
}
