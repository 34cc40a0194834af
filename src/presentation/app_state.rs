// Application state for HTTP handlers
use crate::application::monitor_service::MonitorService;
use crate::presentation::labels::Labels;

#[derive(Clone)]
pub struct AppState {
    pub monitor_service: MonitorService,
    pub labels: Labels,
    pub default_trend_limit: usize,
}
