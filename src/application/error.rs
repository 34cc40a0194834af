// Service-level error type
use crate::domain::sample::InvalidSampleError;
use crate::domain::tariff::InvalidTariffError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MonitorError {
    #[error("invalid sample: {0}")]
    InvalidSample(#[from] InvalidSampleError),

    #[error("invalid tariff: {0}")]
    InvalidTariff(#[from] InvalidTariffError),
}
