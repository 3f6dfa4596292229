// Router wiring
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_panel, health_check, list_charts, list_panels, refresh_all, stream_panels,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/panels", get(list_panels))
        .route("/panels/stream", get(stream_panels))
        .route("/panels/:id", get(get_panel))
        .route("/charts", get(list_charts))
        .route("/refresh", post(refresh_all))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
