// Running statistics for one aggregation bucket
use super::sample::Sample;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TierStats {
    pub count: u64,
    pub min_power: f64,
    pub max_power: f64,
    pub sum_power: f64,
    pub sum_current: f64,
    pub sum_voltage: f64,
    pub sum_pf: f64,
    /// Joules accumulated from counter deltas.
    pub total_energy_delta: f64,
}

impl TierStats {
    pub fn record(&mut self, sample: &Sample, energy_delta: f64) {
        if self.count == 0 {
            self.min_power = sample.power;
            self.max_power = sample.power;
        } else {
            self.min_power = self.min_power.min(sample.power);
            self.max_power = self.max_power.max(sample.power);
        }

        self.count += 1;
        self.sum_power += sample.power;
        self.sum_current += sample.current;
        self.sum_voltage += sample.voltage;
        self.sum_pf += sample.power_factor;
        self.total_energy_delta += energy_delta;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn avg_power(&self) -> f64 {
        self.mean(self.sum_power)
    }

    pub fn avg_current(&self) -> f64 {
        self.mean(self.sum_current)
    }

    pub fn avg_voltage(&self) -> f64 {
        self.mean(self.sum_voltage)
    }

    pub fn avg_pf(&self) -> f64 {
        self.mean(self.sum_pf)
    }

    fn mean(&self, sum: f64) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            sum / self.count as f64
        }
    }
}
