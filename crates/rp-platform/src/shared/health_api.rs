//! Health Check Endpoints
//!
//! Probes for orchestrators and monitoring. None of these are rate limited.
//! - /healthz - Liveness (plain)
//! - /health - Combined health status
//! - /health/live - Liveness probe
//! - /health/ready - Readiness probe

use axum::{
    routing::get,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use chrono::{DateTime, Utc};

use crate::role::store::RoleStore;

/// Health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    /// Service is healthy
    Up,
    /// Service is unhealthy
    Down,
    /// Service is up but not yet ready for traffic
    Degraded,
}

/// Individual health check result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    /// Name of the check
    pub name: String,

    /// Status of the check
    pub status: HealthStatus,

    /// Optional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Time taken for the check in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

/// Full health response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall status
    pub status: HealthStatus,

    /// Current server time
    pub timestamp: DateTime<Utc>,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Seconds since the process started
    pub uptime_secs: i64,

    /// Individual health checks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<HealthCheck>,
}

/// Simple health status response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

/// Role store summary. The store is in memory, so it is up whenever the
/// process can answer.
fn role_store_check(store: &RoleStore) -> HealthCheck {
    let start = std::time::Instant::now();
    let count = store.count();

    HealthCheck {
        name: "role-store".to_string(),
        status: HealthStatus::Up,
        message: Some(format!("{} roles stored", count)),
        duration_ms: Some(start.elapsed().as_millis() as u64),
    }
}

/// Health service state
#[derive(Clone)]
pub struct HealthState {
    /// Store summarized in the combined check
    pub store: Option<Arc<RoleStore>>,

    /// Service version
    pub version: Option<String>,

    /// Startup time
    pub started_at: DateTime<Utc>,

    /// Ready flag (set after the listener is bound)
    pub ready: Arc<AtomicBool>,
}

impl HealthState {
    pub fn new(store: Option<Arc<RoleStore>>, version: Option<String>) -> Self {
        Self {
            store,
            version,
            started_at: Utc::now(),
            ready: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Mark the service as ready
    pub fn set_ready(&self) {
        self.ready.store(true, Ordering::SeqCst);
    }

    /// Check if the service is ready
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }
}

fn readiness_code(status: HealthStatus) -> StatusCode {
    if status == HealthStatus::Down {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

/// Plain liveness check
///
/// Always 200 while the process is serving. Not subject to rate limiting.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = SimpleHealthResponse)
    )
)]
pub async fn get_healthz() -> Json<SimpleHealthResponse> {
    Json(SimpleHealthResponse { status: HealthStatus::Up })
}

/// Combined health check
///
/// Reports degraded until startup has finished. Use this for dashboards.
pub async fn get_health(State(state): State<HealthState>) -> Response {
    let checks: Vec<HealthCheck> = state.store.iter().map(|store| role_store_check(store)).collect();
    let overall_status = if state.is_ready() {
        HealthStatus::Up
    } else {
        HealthStatus::Degraded
    };

    let now = Utc::now();
    let response = HealthResponse {
        status: overall_status,
        timestamp: now,
        version: state.version.clone(),
        uptime_secs: (now - state.started_at).num_seconds(),
        checks,
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Liveness probe
pub async fn get_liveness() -> Json<SimpleHealthResponse> {
    Json(SimpleHealthResponse { status: HealthStatus::Up })
}

/// Readiness probe. 503 until the service is marked ready.
pub async fn get_readiness(State(state): State<HealthState>) -> Response {
    let status = if state.is_ready() { HealthStatus::Up } else { HealthStatus::Down };
    (readiness_code(status), Json(SimpleHealthResponse { status })).into_response()
}

/// `/healthz`, listed in the OpenAPI document
pub fn healthz_router() -> OpenApiRouter {
    OpenApiRouter::new().routes(routes!(get_healthz))
}

/// Probe routes, nested under /health
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/", get(get_health))
        .route("/live", get(get_liveness))
        .route("/ready", get(get_readiness))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        assert_eq!(serde_json::to_string(&HealthStatus::Up).unwrap(), "\"UP\"");
        assert_eq!(serde_json::to_string(&HealthStatus::Down).unwrap(), "\"DOWN\"");
    }

    #[test]
    fn test_health_state() {
        let state = HealthState::new(None, Some("1.0.0".to_string()));
        assert!(!state.is_ready());

        state.set_ready();
        assert!(state.is_ready());
    }

    #[test]
    fn test_role_store_check_reports_count() {
        let store = RoleStore::default();
        store.create(crate::role::entity::RoleFields::new("Engineer", "Build things"), false);

        let check = role_store_check(&store);
        assert_eq!(check.status, HealthStatus::Up);
        assert_eq!(check.message.as_deref(), Some("1 roles stored"));
        assert!(check.duration_ms.is_some());
    }

    #[tokio::test]
    async fn test_health_degraded_until_ready() {
        let state = HealthState::new(Some(Arc::new(RoleStore::default())), None);
        assert_eq!(get_health(State(state.clone())).await.status(), StatusCode::OK);

        let res = get_readiness(State(state.clone())).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

        state.set_ready();
        assert_eq!(get_readiness(State(state)).await.status(), StatusCode::OK);
    }
}
