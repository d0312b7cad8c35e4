//! Health check DTOs. These are served without the envelope.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "status": "healthy",
    "version": "0.1.0",
    "timestamp": "2025-03-01T12:00:00Z",
    "checks": {
        "database": {
            "status": "healthy",
            "message": "Connected",
            "response_time_ms": 3
        }
    }
}))]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[schema(example = "0.1.0")]
    pub version: String,
    /// RFC 3339 timestamp of the check
    pub timestamp: String,
    pub checks: BTreeMap<String, ComponentHealth>,
}

impl HealthResponse {
    /// Overall status is the worst component status.
    pub fn from_checks(version: &str, checks: BTreeMap<String, ComponentHealth>) -> Self {
        let status = checks
            .values()
            .map(|c| c.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        Self {
            status,
            version: version.to_string(),
            timestamp: jiff::Timestamp::now().to_string(),
            checks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub response_time_ms: Option<u64>,
}

/// Body of the liveness and readiness checks.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusOnlyResponse {
    pub status: HealthStatus,
    pub timestamp: String,
}

impl StatusOnlyResponse {
    pub fn new(status: HealthStatus) -> Self {
        Self {
            status,
            timestamp: jiff::Timestamp::now().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(status: HealthStatus) -> ComponentHealth {
        ComponentHealth {
            status,
            message: None,
            response_time_ms: Some(1),
        }
    }

    #[test]
    fn test_health_status_serialization() {
        let json = serde_json::to_string(&HealthStatus::Unhealthy).unwrap();
        assert_eq!(json, "\"unhealthy\"");
    }

    #[test]
    fn test_overall_status_is_worst_component() {
        let mut checks = BTreeMap::new();
        checks.insert("database".to_string(), component(HealthStatus::Healthy));
        assert_eq!(
            HealthResponse::from_checks("0.1.0", checks).status,
            HealthStatus::Healthy
        );

        let mut checks = BTreeMap::new();
        checks.insert("database".to_string(), component(HealthStatus::Unhealthy));
        checks.insert("disk".to_string(), component(HealthStatus::Degraded));
        let response = HealthResponse::from_checks("0.1.0", checks);
        assert_eq!(response.status, HealthStatus::Unhealthy);
        assert_eq!(response.version, "0.1.0");
    }

    #[test]
    fn test_no_checks_is_healthy() {
        let response = HealthResponse::from_checks("1.0.0", BTreeMap::new());
        assert_eq!(response.status, HealthStatus::Healthy);
    }
}
