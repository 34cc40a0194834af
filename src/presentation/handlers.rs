// HTTP request handlers
use crate::application::error::MonitorError;
use crate::domain::sample::Sample;
use crate::infrastructure::config::TREND_LIMIT_RANGE;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::responses::{
    classified_to_record, cost_to_response, distribution_to_response, ingest_to_response,
    statistics_to_response, status_to_response, summary_to_response, trend_to_response,
    ErrorResponse,
};
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::ops::RangeInclusive;
use std::sync::Arc;

const DEFAULT_CLASSIFY_LIMIT: usize = 10;
const CLASSIFY_LIMIT_RANGE: RangeInclusive<usize> = 1..=100;

#[derive(Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[derive(Deserialize)]
pub struct CostQuery {
    pub kwh_price: Option<f64>,
}

/// One sample or a batch, in arrival order
pub enum SamplePayload {
    Batch(Vec<Sample>),
    Single(Sample),
}

impl SamplePayload {
    /// Decode by JSON shape so a malformed sample reports its own field
    /// error instead of a generic variant mismatch.
    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        if value.is_array() {
            serde_json::from_value(value).map(SamplePayload::Batch)
        } else {
            serde_json::from_value(value).map(SamplePayload::Single)
        }
    }
}

fn unprocessable(detail: String) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(ErrorResponse { detail })).into_response()
}

fn check_limit(limit: usize, range: &RangeInclusive<usize>) -> Result<usize, Response> {
    if range.contains(&limit) {
        Ok(limit)
    } else {
        Err(unprocessable(format!(
            "limit must be between {} and {}, got {}",
            range.start(),
            range.end(),
            limit
        )))
    }
}

impl IntoResponse for MonitorError {
    fn into_response(self) -> Response {
        let status = match &self {
            MonitorError::InvalidSample(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MonitorError::InvalidTariff(_) => StatusCode::BAD_REQUEST,
        };
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn respond<T: Serialize>(status: StatusCode, data: &T, headers: &HeaderMap) -> Response {
    match json_response(status, data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Service information
pub async fn root() -> impl IntoResponse {
    Json(json!({
        "name": "Power Monitoring API",
        "version": env!("CARGO_PKG_VERSION"),
        "classification": "Rule-Based",
        "endpoints": {
            "data": "/classify",
            "status": "/status",
            "summary": "/summary",
            "trend": "/trend",
            "statistics": "/statistics",
            "distribution": "/distribution",
            "cost": "/cost_estimate",
            "ingest": "/samples",
        }
    }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "healthy", "service": "power-monitor" }))
}

/// Accept one sample or an array of samples
pub async fn ingest_samples(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Response {
    let payload = match SamplePayload::from_json(body) {
        Ok(payload) => payload,
        Err(e) => return unprocessable(format!("invalid sample payload: {}", e)),
    };

    match payload {
        SamplePayload::Single(sample) => match state.monitor_service.ingest(sample) {
            Ok(_) => (StatusCode::OK, Json(json!({ "accepted": 1, "rejected": [] }))).into_response(),
            Err(e) => e.into_response(),
        },
        SamplePayload::Batch(samples) => {
            let report = state.monitor_service.ingest_batch(samples);
            let status = if report.rejected.is_empty() {
                StatusCode::OK
            } else {
                StatusCode::UNPROCESSABLE_ENTITY
            };
            (status, Json(ingest_to_response(report))).into_response()
        }
    }
}

/// Clear aggregates and trend history
pub async fn reset(State(state): State<Arc<AppState>>) -> StatusCode {
    state.monitor_service.reset();
    StatusCode::NO_CONTENT
}

/// Latest reading with classification and alerts
pub async fn get_status(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    match state.monitor_service.status() {
        Some(report) => {
            let body = status_to_response(report, &state.labels);
            respond(StatusCode::OK, &body, &headers).await
        }
        None => {
            let body = ErrorResponse {
                detail: "no data available".to_string(),
            };
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
    }
}

/// Overall statistics across every active sample
pub async fn get_summary(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let body = summary_to_response(&state.monitor_service.summary());
    respond(StatusCode::OK, &body, &headers).await
}

/// Recent samples for charting
pub async fn get_trend(
    Query(query): Query<LimitQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let limit = match check_limit(
        query.limit.unwrap_or(state.default_trend_limit),
        &TREND_LIMIT_RANGE,
    ) {
        Ok(limit) => limit,
        Err(response) => return response,
    };
    let samples = state.monitor_service.trend(limit);
    respond(StatusCode::OK, &trend_to_response(&samples), &headers).await
}

/// Latest samples with their load status
pub async fn get_classified(
    Query(query): Query<LimitQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let limit = match check_limit(
        query.limit.unwrap_or(DEFAULT_CLASSIFY_LIMIT),
        &CLASSIFY_LIMIT_RANGE,
    ) {
        Ok(limit) => limit,
        Err(response) => return response,
    };
    let records: Vec<_> = state
        .monitor_service
        .recent_classified(limit)
        .into_iter()
        .map(|c| classified_to_record(c, &state.labels))
        .collect();
    respond(StatusCode::OK, &records, &headers).await
}

/// Per-tier statistics
pub async fn get_statistics(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let statistics = state.monitor_service.statistics();
    let body = statistics_to_response(&statistics, &state.labels);
    respond(StatusCode::OK, &body, &headers).await
}

/// Load distribution across tiers
pub async fn get_distribution(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let dist = state.monitor_service.distribution();
    let body = distribution_to_response(&dist, &state.labels);
    respond(StatusCode::OK, &body, &headers).await
}

/// Electricity cost at the configured or requested tariff
pub async fn get_cost_estimate(
    Query(query): Query<CostQuery>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.monitor_service.cost_estimate(query.kwh_price) {
        Ok(cost) => {
            let body = cost_to_response(&cost, &state.labels);
            respond(StatusCode::OK, &body, &headers).await
        }
        Err(e) => {
            tracing::warn!("cost estimate rejected: {}", e);
            e.into_response()
        }
    }
}
