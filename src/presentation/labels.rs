// Presentation labels for tiers and alerts
use crate::domain::alerts::Alert;
use crate::domain::tier::Tier;
use crate::infrastructure::config::LabelsConfig;

/// Maps internal enums to the locale-specific strings the dashboard shows.
#[derive(Debug, Clone)]
pub struct Labels {
    config: LabelsConfig,
}

impl Labels {
    pub fn new(config: LabelsConfig) -> Self {
        Self { config }
    }

    pub fn tier(&self, tier: Tier) -> &str {
        match tier {
            Tier::Normal => &self.config.normal,
            Tier::Medium => &self.config.medium,
            Tier::High => &self.config.high,
        }
    }

    /// Tier label, or the sensor-off label for inactive readings.
    pub fn status(&self, tier: Option<Tier>) -> &str {
        tier.map_or(self.config.sensor_off.as_str(), |t| self.tier(t))
    }

    pub fn alert(&self, alert: Alert) -> &str {
        match alert {
            Alert::VoltageOutOfBand => &self.config.voltage_alert,
            Alert::LowPowerFactor => &self.config.power_factor_alert,
            Alert::Overcurrent => &self.config.current_alert,
            Alert::HighConsumption => &self.config.high_consumption_alert,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::new(LabelsConfig::default())
    }
}
