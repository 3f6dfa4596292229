// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::infrastructure::chart_registry::ChartRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub charts: Arc<ChartRegistry>,
}
