// Monitor service - Ingestion and query use cases over shared aggregate state
use crate::application::aggregator::{AggregateSnapshot, Aggregator};
use crate::application::cost::{estimate, CostBreakdown, CostEstimator};
use crate::application::distribution::{distribution, DistributionSnapshot};
use crate::application::error::MonitorError;
use crate::application::trend::TrendBuffer;
use crate::domain::alerts::{Alert, AlertRules, MetricSeverity};
use crate::domain::classifier::LoadClassifier;
use crate::domain::sample::Sample;
use crate::domain::stats::TierStats;
use crate::domain::tier::Tier;
use parking_lot::RwLock;
use std::sync::Arc;

/// Everything mutated by ingestion. Aggregates and recent history live
/// behind the same lock so readers never see one updated without the other.
#[derive(Debug, Clone)]
pub struct MonitorState {
    aggregator: Aggregator,
    trend: TrendBuffer,
}

impl MonitorState {
    pub fn new(classifier: LoadClassifier, trend_capacity: usize) -> Self {
        Self {
            aggregator: Aggregator::new(classifier),
            trend: TrendBuffer::new(trend_capacity),
        }
    }

    fn ingest(&mut self, sample: Sample) -> Result<Option<Tier>, MonitorError> {
        let tier = self.aggregator.ingest(&sample)?;
        self.trend.push(sample);
        Ok(tier)
    }

    fn reset(&mut self) {
        self.aggregator.reset();
        self.trend.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSample {
    pub sample: Sample,
    /// `None` when the sensor reported no active power.
    pub tier: Option<Tier>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub latest: ClassifiedSample,
    pub alerts: Vec<Alert>,
    pub severity: MetricSeverity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub index: usize,
    pub error: MonitorError,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
}

/// Consistent read of aggregates and their distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    pub snapshot: AggregateSnapshot,
    pub distribution: DistributionSnapshot,
}

#[derive(Clone)]
pub struct MonitorService {
    state: Arc<RwLock<MonitorState>>,
    alert_rules: AlertRules,
    estimator: CostEstimator,
}

impl MonitorService {
    pub fn new(state: MonitorState, alert_rules: AlertRules, estimator: CostEstimator) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            alert_rules,
            estimator,
        }
    }

    pub fn ingest(&self, sample: Sample) -> Result<Option<Tier>, MonitorError> {
        let result = self.state.write().ingest(sample);
        match &result {
            Ok(tier) => tracing::debug!(?tier, "ingested sample"),
            Err(e) => tracing::warn!("rejected sample: {}", e),
        }
        result
    }

    /// Ingest samples in order. Invalid samples are reported and skipped;
    /// the rest are still applied.
    pub fn ingest_batch(&self, samples: Vec<Sample>) -> IngestReport {
        let mut report = IngestReport::default();
        for (index, sample) in samples.into_iter().enumerate() {
            match self.ingest(sample) {
                Ok(_) => report.accepted += 1,
                Err(error) => report.rejected.push(Rejection { index, error }),
            }
        }
        report
    }

    pub fn reset(&self) {
        self.state.write().reset();
        tracing::info!("monitor state reset");
    }

    pub fn snapshot(&self) -> AggregateSnapshot {
        self.state.read().aggregator.snapshot()
    }

    /// Latest accepted reading with its alerts, if any sample was ingested.
    pub fn status(&self) -> Option<StatusReport> {
        let latest = {
            let state = self.state.read();
            let sample = state.trend.latest()?.clone();
            let tier = sample
                .is_active()
                .then(|| state.aggregator.classifier().classify(&sample));
            ClassifiedSample { sample, tier }
        };

        let alerts = self.alert_rules.assess(&latest.sample);
        let severity = self.alert_rules.severity(&alerts);
        Some(StatusReport {
            latest,
            alerts,
            severity,
        })
    }

    pub fn summary(&self) -> TierStats {
        *self.snapshot().all()
    }

    pub fn trend(&self, limit: usize) -> Vec<Sample> {
        self.state.read().trend.window(limit).cloned().collect()
    }

    pub fn recent_classified(&self, limit: usize) -> Vec<ClassifiedSample> {
        let state = self.state.read();
        let classifier = state.aggregator.classifier();
        state
            .trend
            .window(limit)
            .map(|sample| ClassifiedSample {
                sample: sample.clone(),
                tier: sample.is_active().then(|| classifier.classify(sample)),
            })
            .collect()
    }

    pub fn statistics(&self) -> Statistics {
        let snapshot = self.snapshot();
        Statistics {
            snapshot,
            distribution: distribution(&snapshot),
        }
    }

    pub fn distribution(&self) -> DistributionSnapshot {
        distribution(&self.snapshot())
    }

    /// Cost at the configured tariff, or at `kwh_price` when given.
    pub fn cost_estimate(&self, kwh_price: Option<f64>) -> Result<CostBreakdown, MonitorError> {
        let snapshot = self.snapshot();
        match kwh_price {
            Some(price) => Ok(estimate(&snapshot, price)?),
            None => Ok(self.estimator.estimate(&snapshot)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::{sample_at, InvalidSampleError};
    use crate::domain::tariff::InvalidTariffError;

    fn service(trend_capacity: usize) -> MonitorService {
        MonitorService::new(
            MonitorState::new(LoadClassifier::default(), trend_capacity),
            AlertRules::default(),
            CostEstimator::new(1444.70).unwrap(),
        )
    }

    #[test]
    fn test_end_to_end_three_tiers() {
        let service = service(50);
        let samples = [
            sample_at(0, 220.0, 1.0, 50.0, 0.0),
            sample_at(1, 220.0, 3.0, 300.0, 0.0),
            sample_at(2, 220.0, 15.0, 800.0, 0.0),
        ];

        let mut tiers = Vec::new();
        let mut overcurrent = Vec::new();
        for sample in samples {
            tiers.push(service.ingest(sample).unwrap());
            let status = service.status().unwrap();
            overcurrent.push(status.alerts.contains(&Alert::Overcurrent));
        }

        assert_eq!(tiers, vec![Some(Tier::Normal), Some(Tier::Medium), Some(Tier::High)]);
        assert_eq!(overcurrent, vec![false, false, true]);

        let dist = service.distribution();
        assert_eq!(dist.total_records, 3);
        for tier in Tier::ALL {
            assert_eq!(dist.percentage(tier), 33.3);
        }
    }

    #[test]
    fn test_status_is_none_before_ingest() {
        let service = service(10);
        assert!(service.status().is_none());
        assert_eq!(service.summary(), TierStats::default());
        assert!(service.trend(50).is_empty());
    }

    #[test]
    fn test_status_of_inactive_reading_has_no_tier() {
        let service = service(10);
        service.ingest(sample_at(0, 220.0, 0.0, 0.0, 0.0)).unwrap();
        let status = service.status().unwrap();
        assert_eq!(status.latest.tier, None);
        assert_eq!(service.summary().count, 0);
        assert_eq!(service.trend(10).len(), 1);
    }

    #[test]
    fn test_rejected_sample_is_not_buffered() {
        let service = service(10);
        let mut bad = sample_at(0, 220.0, 1.0, 50.0, 0.0);
        bad.voltage = f64::NAN;

        assert!(matches!(
            service.ingest(bad),
            Err(MonitorError::InvalidSample(InvalidSampleError::NonFinite { .. }))
        ));
        assert!(service.trend(10).is_empty());
        assert!(service.status().is_none());
    }

    #[test]
    fn test_ingest_batch_reports_rejections() {
        let service = service(10);
        let mut bad = sample_at(1, 220.0, 1.0, 50.0, 0.0);
        bad.current = f64::INFINITY;

        let report = service.ingest_batch(vec![
            sample_at(0, 220.0, 1.0, 50.0, 0.0),
            bad,
            sample_at(2, 220.0, 2.0, 200.0, 0.0),
        ]);

        assert_eq!(report.accepted, 2);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].index, 1);
        assert_eq!(service.summary().count, 2);
    }

    #[test]
    fn test_cost_override_validates_price() {
        let service = service(10);
        assert_eq!(service.cost_estimate(None).unwrap().kwh_price, 1444.70);
        assert_eq!(service.cost_estimate(Some(1415.0)).unwrap().kwh_price, 1415.0);
        assert_eq!(
            service.cost_estimate(Some(0.0)),
            Err(MonitorError::InvalidTariff(InvalidTariffError(0.0)))
        );
    }

    #[test]
    fn test_recent_classified_labels_each_sample() {
        let service = service(10);
        service.ingest(sample_at(0, 220.0, 1.0, 50.0, 0.0)).unwrap();
        service.ingest(sample_at(1, 220.0, 0.0, 0.0, 0.0)).unwrap();
        service.ingest(sample_at(2, 220.0, 4.0, 700.0, 0.0)).unwrap();

        let tiers: Vec<Option<Tier>> = service
            .recent_classified(2)
            .into_iter()
            .map(|c| c.tier)
            .collect();
        assert_eq!(tiers, vec![None, Some(Tier::High)]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let service = service(10);
        service.ingest(sample_at(0, 220.0, 1.0, 50.0, 0.0)).unwrap();
        service.reset();
        assert!(service.status().is_none());
        assert_eq!(service.snapshot(), AggregateSnapshot::default());
    }

    #[test]
    fn test_readers_see_consistent_snapshots_during_ingest() {
        let service = service(100);
        let writer = {
            let service = service.clone();
            std::thread::spawn(move || {
                for i in 0..2000 {
                    let power = [50.0, 300.0, 800.0][i % 3];
                    service.ingest(sample_at(i as i64, 220.0, 1.0, power, 0.0)).unwrap();
                }
            })
        };

        for _ in 0..500 {
            let stats = service.statistics();
            let per_tier: u64 = stats.snapshot.tiers().map(|(_, s)| s.count).sum();
            assert_eq!(per_tier, stats.snapshot.all().count);
            assert_eq!(stats.distribution.total_records, per_tier);
            let all = stats.snapshot.all();
            if all.count > 0 {
                assert!(all.sum_power >= all.min_power * all.count as f64 - 1e-6);
            }
        }

        writer.join().unwrap();
        assert_eq!(service.summary().count, 2000);
    }
}
