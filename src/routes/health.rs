use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{SecondsFormat, Utc};
use tracing::debug;

use crate::models::{ApiIndex, HealthStatus};
use crate::state::AppState;

pub const ENDPOINTS: [&str; 6] = [
    "/api/health",
    "/api/jobs",
    "/api/jobs/feed",
    "/api/local-jobs",
    "/api/remote-jobs",
    "/api/all-jobs",
];

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    debug!("GET /health - Health check");
    Json(HealthStatus {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        environment: state.environment.clone(),
    })
}

pub async fn index() -> Json<ApiIndex> {
    Json(ApiIndex {
        status: "ok".to_string(),
        message: "DevReno API root".to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}
