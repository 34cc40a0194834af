// Distribution engine - Tier counts and shares derived from a snapshot
use crate::application::aggregator::AggregateSnapshot;
use crate::domain::tier::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DistributionSnapshot {
    pub total_records: u64,
    counts: [u64; 3],
    percentages: [f64; 3],
}

impl DistributionSnapshot {
    pub fn count(&self, tier: Tier) -> u64 {
        self.counts[tier.index()]
    }

    pub fn percentage(&self, tier: Tier) -> f64 {
        self.percentages[tier.index()]
    }

    pub fn entries(&self) -> impl Iterator<Item = (Tier, u64, f64)> + '_ {
        Tier::ALL
            .into_iter()
            .map(|tier| (tier, self.count(tier), self.percentage(tier)))
    }

    /// Tier with the most records. Ties go to the earlier tier.
    pub fn dominant_tier(&self) -> Option<Tier> {
        if self.total_records == 0 {
            return None;
        }

        let mut dominant = Tier::Normal;
        for tier in Tier::ALL {
            if self.count(tier) > self.count(dominant) {
                dominant = tier;
            }
        }
        Some(dominant)
    }
}

pub fn distribution(snapshot: &AggregateSnapshot) -> DistributionSnapshot {
    let counts = Tier::ALL.map(|tier| snapshot.tier(tier).count);

    let total_records: u64 = counts.iter().sum();
    let mut percentages = [0.0; 3];
    if total_records > 0 {
        for (slot, count) in percentages.iter_mut().zip(counts) {
            *slot = round_to(count as f64 / total_records as f64 * 100.0, 1);
        }
    }

    DistributionSnapshot {
        total_records,
        counts,
        percentages,
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
