use crate::domain::alerts::AlertThresholds;
use crate::domain::classifier::TierThresholds;
use crate::domain::tariff::Tariff;
use anyhow::{ensure, Context};
use serde::Deserialize;
use std::ops::RangeInclusive;

const CONFIG_FILE: &str = "config/monitor";
const ENV_PREFIX: &str = "MONITOR";

/// Accepted `limit` values for trend queries.
pub const TREND_LIMIT_RANGE: RangeInclusive<usize> = 10..=200;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MonitorConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub tariff: TariffSettings,
    #[serde(default)]
    pub thresholds: TierThresholds,
    #[serde(default)]
    pub alerts: AlertThresholds,
    #[serde(default)]
    pub trend: TrendSettings,
    #[serde(default)]
    pub labels: LabelsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TariffSettings {
    /// IDR per kWh
    pub kwh_price: f64,
}

impl Default for TariffSettings {
    fn default() -> Self {
        Self { kwh_price: 1444.70 }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TrendSettings {
    pub capacity: usize,
    pub default_limit: usize,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            capacity: 200,
            default_limit: 50,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LabelsConfig {
    pub normal: String,
    pub medium: String,
    pub high: String,
    pub sensor_off: String,
    pub voltage_alert: String,
    pub power_factor_alert: String,
    pub current_alert: String,
    pub high_consumption_alert: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            normal: "Beban Ringan".to_string(),
            medium: "Beban Sedang".to_string(),
            high: "Beban Tinggi".to_string(),
            sensor_off: "Sensor OFF".to_string(),
            voltage_alert: "⚠️ Tegangan tidak stabil".to_string(),
            power_factor_alert: "⚠️ Power factor rendah - efisiensi buruk".to_string(),
            current_alert: "⚠️ Arus terlalu tinggi - risiko overload".to_string(),
            high_consumption_alert: "⚠️ Konsumsi daya sangat tinggi!".to_string(),
        }
    }
}

impl MonitorConfig {
    pub fn tariff(&self) -> anyhow::Result<Tariff> {
        Tariff::new(self.tariff.kwh_price).context("tariff.kwh_price")
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.tariff()?;

        let t = &self.thresholds;
        ensure!(
            t.medium_above_w.is_finite() && t.high_above_w.is_finite(),
            "tier thresholds must be finite"
        );
        ensure!(
            t.medium_above_w < t.high_above_w,
            "thresholds.medium_above_w ({}) must be below thresholds.high_above_w ({})",
            t.medium_above_w,
            t.high_above_w
        );

        let a = &self.alerts;
        ensure!(
            a.voltage_min < a.voltage_max,
            "alerts.voltage_min ({}) must be below alerts.voltage_max ({})",
            a.voltage_min,
            a.voltage_max
        );

        ensure!(self.trend.capacity > 0, "trend.capacity must be positive");
        ensure!(
            TREND_LIMIT_RANGE.contains(&self.trend.default_limit),
            "trend.default_limit ({}) must be between {} and {}",
            self.trend.default_limit,
            TREND_LIMIT_RANGE.start(),
            TREND_LIMIT_RANGE.end()
        );

        // Labels key the JSON maps; a shared label would merge two buckets
        let l = &self.labels;
        let status_labels = [
            ("labels.normal", &l.normal),
            ("labels.medium", &l.medium),
            ("labels.high", &l.high),
            ("labels.sensor_off", &l.sensor_off),
        ];
        for (i, (key, label)) in status_labels.iter().enumerate() {
            for (other_key, other) in &status_labels[i + 1..] {
                ensure!(
                    label != other,
                    "{} and {} must differ, both are '{}'",
                    key,
                    other_key,
                    label
                );
            }
        }
        Ok(())
    }
}

/// Load `config/monitor.*` (optional) overlaid with `MONITOR__SECTION__KEY`
/// environment variables. `ELECTRICITY_RATE` is honoured as a tariff override.
pub fn load_monitor_config() -> anyhow::Result<MonitorConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("tariff.kwh_price", std::env::var("ELECTRICITY_RATE").ok())?
        .build()?;

    let monitor_config: MonitorConfig = settings.try_deserialize()?;
    monitor_config.validate()?;
    Ok(monitor_config)
}
