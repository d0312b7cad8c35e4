//! Health check endpoint handlers.
//!
//! Served outside `/api` and without the response envelope so load balancers
//! and orchestrators can poll them directly.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::{Json, extract::State, http::StatusCode};
use diesel_async::RunQueryDsl;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::HEALTH_TAG;
use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus, StatusOnlyResponse};
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Database ping with latency
/// - `GET /health/ready` - Readiness check
/// - `GET /health/live` - Liveness check
pub fn health_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health_check))
        .routes(routes!(readiness_check))
        .routes(routes!(liveness_check))
}

fn http_status(status: HealthStatus) -> StatusCode {
    match status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Overall health with per-component checks.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = HealthResponse)
    )
)]
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let mut checks = BTreeMap::new();
    checks.insert("database".to_string(), check_database(&state).await);

    let response = HealthResponse::from_checks(env!("CARGO_PKG_VERSION"), checks);
    if response.status == HealthStatus::Unhealthy {
        tracing::warn!("health check failed");
    }
    (http_status(response.status), Json(response))
}

/// Ready when the database answers.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is ready", body = StatusOnlyResponse),
        (status = 503, description = "Service is not ready", body = StatusOnlyResponse)
    )
)]
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<StatusOnlyResponse>) {
    let status = check_database(&state).await.status;
    (http_status(status), Json(StatusOnlyResponse::new(status)))
}

/// Alive as long as the process answers; no dependencies are touched.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is alive", body = StatusOnlyResponse)
    )
)]
async fn liveness_check() -> Json<StatusOnlyResponse> {
    Json(StatusOnlyResponse::new(HealthStatus::Healthy))
}

/// Runs `SELECT 1` on a pooled connection.
async fn check_database(state: &AppState) -> ComponentHealth {
    let start = Instant::now();
    let elapsed_ms = || Some(start.elapsed().as_millis() as u64);

    let mut conn = match state.db_pool.get().await {
        Ok(conn) => conn,
        Err(e) => {
            return ComponentHealth {
                status: HealthStatus::Unhealthy,
                message: Some(format!("Connection failed: {e}")),
                response_time_ms: elapsed_ms(),
            };
        }
    };

    match diesel::sql_query("SELECT 1").execute(&mut conn).await {
        Ok(_) => ComponentHealth {
            status: HealthStatus::Healthy,
            message: Some("Connected".to_string()),
            response_time_ms: elapsed_ms(),
        },
        Err(e) => ComponentHealth {
            status: HealthStatus::Unhealthy,
            message: Some(format!("Query failed: {e}")),
            response_time_ms: elapsed_ms(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(http_status(HealthStatus::Healthy), StatusCode::OK);
        assert_eq!(http_status(HealthStatus::Degraded), StatusCode::OK);
        assert_eq!(
            http_status(HealthStatus::Unhealthy),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[tokio::test]
    async fn test_liveness_check() {
        let Json(body) = liveness_check().await;
        assert_eq!(body.status, HealthStatus::Healthy);
    }
}
