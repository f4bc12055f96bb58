//! Health endpoint integration tests
//!
//! Tests for the health check endpoints:
//! - GET /health - Full health check with credential status
//! - GET /health/ready - Readiness probe
//! - GET /health/live - Liveness probe

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::common::{self, constants::TEST_TOKEN};

#[tokio::test]
async fn test_health_is_healthy_when_token_configured() {
    let server = common::test_server(common::test_config("http://dify.local", Some(TEST_TOKEN)));

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let payload: Value = response.json();
    assert_eq!(payload["status"], "healthy");
    assert_eq!(payload["checks"]["dify"]["status"], "healthy");
    assert_eq!(payload["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_is_degraded_without_token() {
    let server = common::test_server(common::test_config("http://dify.local", None));

    let response = server.get("/health").await;

    // Degraded, not unhealthy: the HTTP surface still answers its contract
    assert_eq!(response.status_code(), StatusCode::OK);
    let payload: Value = response.json();
    assert_eq!(payload["status"], "degraded");
    assert_eq!(payload["checks"]["dify"]["status"], "degraded");
}

#[tokio::test]
async fn test_probes_always_succeed() {
    let server = common::test_server(common::test_config("http://dify.local", None));

    for path in ["/health/ready", "/health/live"] {
        let response = server.get(path).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let payload: Value = response.json();
        assert_eq!(payload["status"], "healthy");
    }
}
