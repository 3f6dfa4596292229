// HTTP request handlers
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::infrastructure::json_mapper::{dashboard_to_dto, live_chart_to_dto, panel_to_dto};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshStarted {
    started: usize,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

async fn respond<T: Serialize>(status: StatusCode, data: &T, headers: &HeaderMap) -> Response {
    match json_response(status, data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Every panel as currently shown
pub async fn list_panels(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let dashboard = dashboard_to_dto(state.dashboard_service.dashboard());
    respond(StatusCode::OK, &dashboard, &headers).await
}

pub async fn get_panel(
    Path(id): Path<String>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.dashboard_service.panel(&id) {
        Some(snapshot) => respond(StatusCode::OK, &panel_to_dto(snapshot), &headers).await,
        None => {
            let body = json!({ "error": format!("unknown panel '{}'", id) });
            respond(StatusCode::NOT_FOUND, &body, &headers).await
        }
    }
}

/// Manual refresh: start a load for every panel and return without waiting
pub async fn refresh_all(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let started = state.dashboard_service.load_all().len();
    tracing::info!(
        "Manual refresh started {} panel loads ({} charts live)",
        started,
        state.charts.live_count()
    );
    respond(StatusCode::ACCEPTED, &RefreshStarted { started }, &headers).await
}

/// Live charts held by the charting backend
pub async fn list_charts(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let charts: Vec<_> = state
        .charts
        .live_charts()
        .into_iter()
        .map(live_chart_to_dto)
        .collect();
    respond(StatusCode::OK, &charts, &headers).await
}

/// Stream panel updates (current state first)
pub async fn stream_panels(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Subscribe before reading the snapshots so nothing falls in between
    let rx = state.dashboard_service.subscribe();
    let initial = state.dashboard_service.dashboard().panels;
    stream_from_receiver(initial, rx, accepts_brotli(&headers))
}

#[cfg(test)]
mod tests {
    use crate::application::dashboard_service::DashboardService;
    use crate::application::fetcher::Fetcher;
    use crate::application::panel_presenter::StalePolicy;
    use crate::domain::error::LoadError;
    use crate::domain::panel::{Endpoint, PanelDefinition};
    use crate::infrastructure::chart_registry::ChartRegistry;
    use crate::presentation::app_state::AppState;
    use crate::presentation::routes::router;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StaticFetcher;

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch_json(&self, endpoint: &Endpoint) -> Result<Value, LoadError> {
            if endpoint.url.ends_with("/posts") {
                Ok(json!([{ "userId": 1 }, { "userId": 2 }, { "userId": 2 }]))
            } else {
                Err(LoadError::http(503, Some("Service unavailable".to_string())))
            }
        }
    }

    fn state() -> Arc<AppState> {
        let charts = Arc::new(ChartRegistry::new());
        let dashboard_service = DashboardService::new(
            Arc::new(StaticFetcher),
            charts.clone(),
            vec![
                PanelDefinition::posts(Endpoint::new("http://test.local/posts")),
                PanelDefinition::market(Endpoint::new("http://test.local/markets")),
            ],
            StalePolicy::Discard,
        );
        Arc::new(AppState {
            dashboard_service,
            charts,
        })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn get(state: Arc<AppState>, uri: &str) -> axum::response::Response {
        router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = get(state(), "/healthz").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_panels_before_first_load() {
        let response = get(state(), "/panels").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["title"], "Public API Dashboard");
        assert_eq!(body["panels"][0]["id"], "posts");
        assert_eq!(body["panels"][0]["status"], "idle");
        assert_eq!(body["panels"][1]["chart"], Value::Null);
    }

    #[tokio::test]
    async fn test_refresh_then_read_panels() {
        let state = state();
        let response = router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        assert_eq!(body_json(response).await["started"], 2);

        // Loads run in the background; drive them to completion directly
        for panel in state.dashboard_service.panels() {
            state.dashboard_service.load_panel(panel).await;
        }

        let posts = body_json(get(state.clone(), "/panels/posts").await).await;
        assert_eq!(posts["status"], "ready");
        assert_eq!(posts["chart"]["labels"], json!(["1", "2"]));
        assert_eq!(posts["chart"]["values"], json!([1.0, 2.0]));

        let market = body_json(get(state.clone(), "/panels/market").await).await;
        assert_eq!(market["status"], "failed");
        assert_eq!(market["message"], "Error: Service unavailable");
        assert_eq!(market["isError"], true);

        let charts = body_json(get(state.clone(), "/charts").await).await;
        assert_eq!(charts.as_array().unwrap().len(), 1);
        assert_eq!(charts[0]["surface"], "posts-chart");
    }

    #[tokio::test]
    async fn test_unknown_panel_is_not_found() {
        let response = get(state(), "/panels/weather").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "unknown panel 'weather'");
    }
}
