//! Tests for health check endpoints.
//!
//! Every test in this binary loads a valid dataset: the health registry is
//! process-wide, so a failing load here would leak into the other tests.

use axum::http::StatusCode;
use integration_tests::setup::TestContext;

/// Test /health endpoint returns proper structure
#[tokio::test]
async fn test_health_endpoint_structure() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();

    for field in ["status", "dataset_loaded", "videos", "metrics"] {
        assert!(
            body.get(field).is_some(),
            "Response should have '{}' field",
            field
        );
    }
}

/// Test /health reports the loaded dataset
#[tokio::test]
async fn test_health_after_load() {
    let ctx = TestContext::new();
    let server = ctx.server();

    server.get("/aggregate").await.assert_status_ok();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["dataset_loaded"], true);
    assert_eq!(body["videos"], 4);
    assert!(body.get("message").is_none(), "No message when healthy");

    let metrics = &body["metrics"];
    assert!(metrics["cache_misses"].as_u64().unwrap_or(0) >= 1);
    assert!(metrics["dataset_loads"].as_u64().unwrap_or(0) >= 1);
    assert!(metrics["load_latency_mean_ms"].is_number());
    assert_eq!(metrics["load_latency_buckets"].as_array().map(Vec::len), Some(9));
}

/// Test /health/ready returns 200 once a dataset has loaded
#[tokio::test]
async fn test_ready_endpoint() {
    let ctx = TestContext::new();
    ctx.state.cache.get().await.expect("dataset should load");

    let server = ctx.server();
    let response = server.get("/health/ready").await;
    response.assert_status(StatusCode::OK);
}

/// Test /health/live endpoint always returns 200 when service is running
#[tokio::test]
async fn test_live_endpoint() {
    let ctx = TestContext::empty();
    let server = ctx.server();

    let response = server.get("/health/live").await;
    response.assert_status(StatusCode::OK);
}
