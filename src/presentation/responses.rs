// JSON response bodies and mappers from application types
//
// Field names follow what the dashboard reads. Values are rounded here and
// nowhere else.
use crate::application::cost::CostBreakdown;
use crate::application::distribution::{round_to, DistributionSnapshot};
use crate::application::monitor_service::{ClassifiedSample, IngestReport, Statistics, StatusReport};
use crate::domain::sample::Sample;
use crate::domain::stats::TierStats;
use crate::domain::tier::Tier;
use crate::presentation::labels::Labels;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct SeverityResponse {
    pub voltage: &'static str,
    pub current: &'static str,
    pub power: &'static str,
    pub pf: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub timestamp: DateTime<Utc>,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub pf: f64,
    pub frequency: f64,
    pub energy: f64,
    pub status: String,
    pub alerts: Vec<String>,
    pub severity: SeverityResponse,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub total_records: u64,
    pub avg_voltage: f64,
    pub avg_current: f64,
    pub avg_power: f64,
    pub min_power: f64,
    pub max_power: f64,
    pub avg_pf: f64,
    pub total_energy: f64,
}

#[derive(Debug, Serialize)]
pub struct TrendResponse {
    pub timestamps: Vec<DateTime<Utc>>,
    pub power: Vec<f64>,
    pub voltage: Vec<f64>,
    pub current: Vec<f64>,
    pub pf: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct ClassifiedRecord {
    pub timestamp: DateTime<Utc>,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
    pub pf: f64,
    pub frequency: f64,
    pub energy: f64,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct TierStatistics {
    pub count: u64,
    pub percentage: f64,
    pub avg_power: f64,
    pub min_power: f64,
    pub max_power: f64,
    pub avg_current: f64,
    pub avg_voltage: f64,
    pub avg_pf: f64,
    pub total_energy: f64,
}

#[derive(Debug, Serialize)]
pub struct DistributionResponse {
    pub total_records: u64,
    pub distribution: BTreeMap<String, u64>,
    pub percentages: BTreeMap<String, f64>,
    pub dominant: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TierCostResponse {
    pub energy_kwh: f64,
    pub cost_idr: f64,
    pub avg_power_w: f64,
    pub duration_records: u64,
}

#[derive(Debug, Serialize)]
pub struct CostEstimateResponse {
    pub total_cost_idr: f64,
    pub kwh_price: f64,
    pub total_energy_kwh: f64,
    pub breakdown: BTreeMap<String, TierCostResponse>,
}

#[derive(Debug, Serialize)]
pub struct RejectionResponse {
    pub index: usize,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub accepted: usize,
    pub rejected: Vec<RejectionResponse>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub fn status_to_response(report: StatusReport, labels: &Labels) -> StatusResponse {
    let sample = report.latest.sample;
    StatusResponse {
        timestamp: sample.timestamp,
        voltage: round_to(sample.voltage, 2),
        current: round_to(sample.current, 3),
        power: round_to(sample.power, 2),
        pf: round_to(sample.power_factor, 2),
        frequency: round_to(sample.frequency, 1),
        energy: round_to(sample.energy, 2),
        status: labels.status(report.latest.tier).to_string(),
        alerts: report
            .alerts
            .iter()
            .map(|a| labels.alert(*a).to_string())
            .collect(),
        severity: SeverityResponse {
            voltage: report.severity.voltage.as_str(),
            current: report.severity.current.as_str(),
            power: report.severity.power.as_str(),
            pf: report.severity.power_factor.as_str(),
        },
    }
}

pub fn summary_to_response(all: &TierStats) -> SummaryResponse {
    SummaryResponse {
        total_records: all.count,
        avg_voltage: round_to(all.avg_voltage(), 2),
        avg_current: round_to(all.avg_current(), 3),
        avg_power: round_to(all.avg_power(), 2),
        min_power: round_to(all.min_power, 2),
        max_power: round_to(all.max_power, 2),
        avg_pf: round_to(all.avg_pf(), 2),
        total_energy: round_to(all.total_energy_delta, 2),
    }
}

pub fn trend_to_response(samples: &[Sample]) -> TrendResponse {
    TrendResponse {
        timestamps: samples.iter().map(|s| s.timestamp).collect(),
        power: samples.iter().map(|s| round_to(s.power, 2)).collect(),
        voltage: samples.iter().map(|s| round_to(s.voltage, 2)).collect(),
        current: samples.iter().map(|s| round_to(s.current, 3)).collect(),
        pf: samples.iter().map(|s| round_to(s.power_factor, 2)).collect(),
    }
}

pub fn classified_to_record(classified: ClassifiedSample, labels: &Labels) -> ClassifiedRecord {
    let sample = classified.sample;
    ClassifiedRecord {
        timestamp: sample.timestamp,
        voltage: sample.voltage,
        current: sample.current,
        power: sample.power,
        pf: sample.power_factor,
        frequency: sample.frequency,
        energy: sample.energy,
        status: labels.status(classified.tier).to_string(),
    }
}

/// Only tiers that saw at least one record are listed.
pub fn statistics_to_response(
    statistics: &Statistics,
    labels: &Labels,
) -> BTreeMap<String, TierStatistics> {
    statistics
        .snapshot
        .tiers()
        .filter(|(_, stats)| !stats.is_empty())
        .map(|(tier, stats)| {
            let entry = TierStatistics {
                count: stats.count,
                percentage: statistics.distribution.percentage(tier),
                avg_power: round_to(stats.avg_power(), 2),
                min_power: round_to(stats.min_power, 2),
                max_power: round_to(stats.max_power, 2),
                avg_current: round_to(stats.avg_current(), 3),
                avg_voltage: round_to(stats.avg_voltage(), 2),
                avg_pf: round_to(stats.avg_pf(), 2),
                total_energy: round_to(stats.total_energy_delta, 2),
            };
            (labels.tier(tier).to_string(), entry)
        })
        .collect()
}

pub fn distribution_to_response(dist: &DistributionSnapshot, labels: &Labels) -> DistributionResponse {
    let mut distribution = BTreeMap::new();
    let mut percentages = BTreeMap::new();
    for (tier, count, percentage) in dist.entries() {
        distribution.insert(labels.tier(tier).to_string(), count);
        percentages.insert(labels.tier(tier).to_string(), percentage);
    }

    DistributionResponse {
        total_records: dist.total_records,
        distribution,
        percentages,
        dominant: dist.dominant_tier().map(|t| labels.tier(t).to_string()),
    }
}

pub fn cost_to_response(cost: &CostBreakdown, labels: &Labels) -> CostEstimateResponse {
    let breakdown = Tier::ALL
        .into_iter()
        .map(|tier| (tier, cost.tier(tier)))
        .filter(|(_, tier_cost)| tier_cost.duration_records > 0)
        .map(|(tier, tier_cost)| {
            let entry = TierCostResponse {
                energy_kwh: round_to(tier_cost.energy_kwh, 4),
                cost_idr: round_to(tier_cost.cost, 2),
                avg_power_w: round_to(tier_cost.avg_power_w, 2),
                duration_records: tier_cost.duration_records,
            };
            (labels.tier(tier).to_string(), entry)
        })
        .collect();

    CostEstimateResponse {
        total_cost_idr: round_to(cost.total_cost, 2),
        kwh_price: cost.kwh_price,
        total_energy_kwh: round_to(cost.total_energy_kwh, 4),
        breakdown,
    }
}

pub fn ingest_to_response(report: IngestReport) -> IngestResponse {
    IngestResponse {
        accepted: report.accepted,
        rejected: report
            .rejected
            .into_iter()
            .map(|r| RejectionResponse {
                index: r.index,
                error: r.error.to_string(),
            })
            .collect(),
    }
}
