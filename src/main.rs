// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::EnvFilter;

use crate::application::cost::CostEstimator;
use crate::application::monitor_service::{MonitorService, MonitorState};
use crate::domain::alerts::AlertRules;
use crate::domain::classifier::LoadClassifier;
use crate::infrastructure::config::load_monitor_config;
use crate::presentation::app_state::AppState;
use crate::presentation::labels::Labels;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let monitor_config = load_monitor_config()?;

    // Aggregate state lives for the lifetime of the process
    let state = MonitorState::new(
        LoadClassifier::new(monitor_config.thresholds),
        monitor_config.trend.capacity,
    );
    let monitor_service = MonitorService::new(
        state,
        AlertRules::new(monitor_config.alerts),
        CostEstimator::with_tariff(monitor_config.tariff()?),
    );

    let app_state = Arc::new(AppState {
        monitor_service,
        labels: Labels::new(monitor_config.labels.clone()),
        default_trend_limit: monitor_config.trend.default_limit,
    });

    let router = build_router(app_state);

    // Start server
    let addr: SocketAddr = monitor_config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid server.bind '{}'", monitor_config.server.bind))?;
    tracing::info!(
        kwh_price = monitor_config.tariff.kwh_price,
        trend_capacity = monitor_config.trend.capacity,
        "Starting power-monitor service on {}",
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
