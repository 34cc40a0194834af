// Cost estimator - Converts accumulated energy into currency
use crate::application::aggregator::AggregateSnapshot;
use crate::domain::tariff::{joules_to_kwh, InvalidTariffError, Tariff};
use crate::domain::tier::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TierCost {
    pub energy_kwh: f64,
    pub avg_power_w: f64,
    pub cost: f64,
    pub duration_records: u64,
}

/// Unrounded cost figures; rounding is left to whoever renders them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBreakdown {
    pub total_cost: f64,
    pub kwh_price: f64,
    pub total_energy_kwh: f64,
    per_tier: [TierCost; 3],
}

impl CostBreakdown {
    pub fn tier(&self, tier: Tier) -> &TierCost {
        &self.per_tier[tier.index()]
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CostEstimator {
    tariff: Tariff,
}

impl CostEstimator {
    pub fn new(kwh_price: f64) -> Result<Self, InvalidTariffError> {
        Ok(Self::with_tariff(Tariff::new(kwh_price)?))
    }

    pub fn with_tariff(tariff: Tariff) -> Self {
        Self { tariff }
    }

    pub fn estimate(&self, snapshot: &AggregateSnapshot) -> CostBreakdown {
        let kwh_price = self.tariff.kwh_price();

        let mut per_tier = [TierCost::default(); 3];
        for (tier, stats) in snapshot.tiers() {
            let energy_kwh = joules_to_kwh(stats.total_energy_delta);
            per_tier[tier.index()] = TierCost {
                energy_kwh,
                avg_power_w: stats.avg_power(),
                cost: energy_kwh * kwh_price,
                duration_records: stats.count,
            };
        }

        let total_energy_kwh = joules_to_kwh(snapshot.all().total_energy_delta);
        CostBreakdown {
            total_cost: total_energy_kwh * kwh_price,
            kwh_price,
            total_energy_kwh,
            per_tier,
        }
    }
}

pub fn estimate(
    snapshot: &AggregateSnapshot,
    kwh_price: f64,
) -> Result<CostBreakdown, InvalidTariffError> {
    Ok(CostEstimator::new(kwh_price)?.estimate(snapshot))
}
