// Application layer - Aggregation, derived views and the service facade
pub mod aggregator;
pub mod cost;
pub mod distribution;
pub mod error;
pub mod monitor_service;
pub mod trend;
