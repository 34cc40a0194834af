// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_classified, get_cost_estimate, get_distribution, get_statistics, get_status, get_summary,
    get_trend, health_check, ingest_samples, reset, root,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/samples", post(ingest_samples))
        .route("/reset", post(reset))
        .route("/status", get(get_status))
        .route("/summary", get(get_summary))
        .route("/trend", get(get_trend))
        .route("/classify", get(get_classified))
        .route("/statistics", get(get_statistics))
        .route("/distribution", get(get_distribution))
        .route("/cost_estimate", get(get_cost_estimate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
