// Aggregator - Per-tier running statistics over the active sample stream
use crate::domain::classifier::LoadClassifier;
use crate::domain::sample::{InvalidSampleError, Sample};
use crate::domain::stats::TierStats;
use crate::domain::tier::Tier;

/// Point-in-time copy of every aggregation bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AggregateSnapshot {
    tiers: [TierStats; 3],
    all: TierStats,
}

impl AggregateSnapshot {
    pub fn tier(&self, tier: Tier) -> &TierStats {
        &self.tiers[tier.index()]
    }

    pub fn all(&self) -> &TierStats {
        &self.all
    }

    pub fn tiers(&self) -> impl Iterator<Item = (Tier, &TierStats)> {
        Tier::ALL.into_iter().zip(self.tiers.iter())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    classifier: LoadClassifier,
    tiers: [TierStats; 3],
    all: TierStats,
    last_energy: Option<f64>,
}

impl Aggregator {
    pub fn new(classifier: LoadClassifier) -> Self {
        Self {
            classifier,
            ..Self::default()
        }
    }

    pub fn classifier(&self) -> &LoadClassifier {
        &self.classifier
    }

    /// Fold one sample into the aggregates.
    ///
    /// Returns the tier the sample was counted under, or `None` when the
    /// sample carried no active power. A rejected sample leaves every
    /// bucket and the energy counter untouched.
    pub fn ingest(&mut self, sample: &Sample) -> Result<Option<Tier>, InvalidSampleError> {
        sample.check_finite()?;

        // First sample of a session and counter resets contribute nothing
        let energy_delta = match self.last_energy {
            Some(previous) => (sample.energy - previous).max(0.0),
            None => 0.0,
        };

        if sample.power < 0.0 && energy_delta > 0.0 {
            return Err(InvalidSampleError::NegativePowerWithEnergy {
                power: sample.power,
                delta: energy_delta,
            });
        }

        self.last_energy = Some(sample.energy);

        if !sample.is_active() {
            return Ok(None);
        }

        let tier = self.classifier.classify(sample);
        self.tiers[tier.index()].record(sample, energy_delta);
        self.all.record(sample, energy_delta);

        Ok(Some(tier))
    }

    pub fn snapshot(&self) -> AggregateSnapshot {
        AggregateSnapshot {
            tiers: self.tiers,
            all: self.all,
        }
    }

    pub fn reset(&mut self) {
        self.tiers = Default::default();
        self.all = TierStats::default();
        self.last_energy = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::sample_at;

    #[test]
    fn test_ingest_routes_to_tiers() {
        let mut aggregator = Aggregator::default();
        assert_eq!(aggregator.ingest(&sample_at(0, 220.0, 1.0, 50.0, 0.0)), Ok(Some(Tier::Normal)));
        assert_eq!(aggregator.ingest(&sample_at(1, 220.0, 3.0, 300.0, 0.0)), Ok(Some(Tier::Medium)));
        assert_eq!(aggregator.ingest(&sample_at(2, 220.0, 15.0, 800.0, 0.0)), Ok(Some(Tier::High)));

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.all().count, 3);
        let per_tier: u64 = snapshot.tiers().map(|(_, s)| s.count).sum();
        assert_eq!(per_tier, snapshot.all().count);
        assert_eq!(snapshot.tier(Tier::High).max_power, 800.0);
    }

    #[test]
    fn test_inactive_samples_are_not_counted() {
        let mut aggregator = Aggregator::default();
        assert_eq!(aggregator.ingest(&sample_at(0, 220.0, 0.0, 0.0, 0.0)), Ok(None));
        assert_eq!(aggregator.ingest(&sample_at(1, 220.0, 0.0, -2.0, 0.0)), Ok(None));

        let snapshot = aggregator.snapshot();
        assert_eq!(snapshot.all().count, 0);
        assert_eq!(snapshot.tier(Tier::Normal).count, 0);
    }

    #[test]
    fn test_energy_delta_skips_first_sample_and_counter_resets() {
        let mut aggregator = Aggregator::default();
        aggregator.ingest(&sample_at(0, 220.0, 1.0, 50.0, 1000.0)).unwrap();
        aggregator.ingest(&sample_at(1, 220.0, 1.0, 50.0, 1050.0)).unwrap();
        // Counter reset: contributes zero, not -1040
        aggregator.ingest(&sample_at(2, 220.0, 1.0, 50.0, 10.0)).unwrap();
        aggregator.ingest(&sample_at(3, 220.0, 1.0, 50.0, 60.0)).unwrap();

        let all = *aggregator.snapshot().all();
        assert_eq!(all.total_energy_delta, 100.0);
    }

    #[test]
    fn test_energy_accumulation_is_monotonic() {
        let mut aggregator = Aggregator::default();
        let counters = [0.0, 30.0, 25.0, 90.0, 90.0, 5.0, 400.0];
        let mut previous_total = 0.0;

        for (i, energy) in counters.iter().enumerate() {
            aggregator.ingest(&sample_at(i as i64, 220.0, 1.0, 150.0, *energy)).unwrap();
            let total = aggregator.snapshot().all().total_energy_delta;
            assert!(total >= previous_total);
            previous_total = total;
        }
    }

    #[test]
    fn test_rejected_sample_does_not_mutate() {
        let mut aggregator = Aggregator::default();
        aggregator.ingest(&sample_at(0, 220.0, 1.0, 50.0, 100.0)).unwrap();
        let before = aggregator.snapshot();

        let mut bad = sample_at(1, 220.0, 1.0, 50.0, 200.0);
        bad.power = f64::NAN;
        assert!(aggregator.ingest(&bad).is_err());

        let negative = sample_at(2, 220.0, 1.0, -5.0, 300.0);
        assert!(matches!(
            aggregator.ingest(&negative),
            Err(InvalidSampleError::NegativePowerWithEnergy { .. })
        ));

        assert_eq!(aggregator.snapshot(), before);

        // Counter still anchored at 100 J
        aggregator.ingest(&sample_at(3, 220.0, 1.0, 50.0, 160.0)).unwrap();
        assert_eq!(aggregator.snapshot().all().total_energy_delta, 60.0);
    }

    #[test]
    fn test_negative_power_without_energy_change_is_accepted() {
        let mut aggregator = Aggregator::default();
        aggregator.ingest(&sample_at(0, 220.0, 1.0, 50.0, 100.0)).unwrap();
        assert_eq!(aggregator.ingest(&sample_at(1, 220.0, 0.0, -1.0, 100.0)), Ok(None));
    }

    #[test]
    fn test_reset_clears_buckets_and_counter() {
        let mut aggregator = Aggregator::default();
        aggregator.ingest(&sample_at(0, 220.0, 1.0, 50.0, 100.0)).unwrap();
        aggregator.ingest(&sample_at(1, 220.0, 1.0, 50.0, 200.0)).unwrap();
        aggregator.reset();

        assert_eq!(aggregator.snapshot(), AggregateSnapshot::default());
        aggregator.ingest(&sample_at(2, 220.0, 1.0, 50.0, 900.0)).unwrap();
        assert_eq!(aggregator.snapshot().all().total_energy_delta, 0.0);
    }
}
