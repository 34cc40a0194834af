// Electricity tariff
pub const JOULES_PER_KWH: f64 = 3_600_000.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("kWh price must be a positive finite number, got {0}")]
pub struct InvalidTariffError(pub f64);

/// Price per kilowatt-hour. Only constructible with a positive price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tariff(f64);

impl Tariff {
    pub fn new(kwh_price: f64) -> Result<Self, InvalidTariffError> {
        if kwh_price.is_finite() && kwh_price > 0.0 {
            Ok(Self(kwh_price))
        } else {
            Err(InvalidTariffError(kwh_price))
        }
    }

    pub fn kwh_price(self) -> f64 {
        self.0
    }
}

pub fn joules_to_kwh(joules: f64) -> f64 {
    joules / JOULES_PER_KWH
}
