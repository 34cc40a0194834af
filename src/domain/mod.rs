// Domain layer - Telemetry model and load classification rules
pub mod alerts;
pub mod classifier;
pub mod sample;
pub mod stats;
pub mod tariff;
pub mod tier;
