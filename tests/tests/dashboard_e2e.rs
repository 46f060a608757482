//! End-to-end tests for the dashboard pages and JSON endpoints.
//!
//! Each test writes CSV exports into a temp directory and drives the real
//! router through axum-test.

use axum::http::StatusCode;
use integration_tests::fixtures::{date, sample_channel, video_metrics_csv, VideoFixture, SERIES_DAYS};
use integration_tests::setup::TestContext;
use dashboard_core::VIDEO_METRICS_FILE;

/// Test / redirects to the aggregate view
#[tokio::test]
async fn test_index_redirects_to_aggregate() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/aggregate");
}

/// Test aggregate page shows tiles and colored deltas
#[tokio::test]
async fn test_aggregate_page() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/aggregate").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("Aggregate Metrics"));
    assert_eq!(html.matches(r#"class="tile-column""#).count(), 5);
    assert_eq!(html.matches(r#"class="tile""#).count(), 10);

    // Views: recent median 350 against baseline 250.
    assert!(html.contains("350.0"));
    assert!(html.contains(r#"<div class="tile-delta pos">40.00%</div>"#));

    // Newest and oldest video views against the 250 baseline.
    assert!(html.contains(r#"<td class="pos">60.00%</td>"#));
    assert!(html.contains(r#"<td class="neg">-60.00%</td>"#));

    // Titles are escaped, rows newest first.
    assert!(html.contains("Pandas &amp; SQL Tips"));
    let newest = html.find("Data Science Roadmap").expect("newest row");
    let oldest = html.find("First Upload").expect("oldest row");
    assert!(newest < oldest);
}

/// Test video page defaults to the newest video
#[tokio::test]
async fn test_video_page_defaults_to_newest() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/videos").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains(r#"<option value="Data Science Roadmap" selected>"#));
    assert!(html.contains("3 comments"));
    assert!(html.contains("<svg"), "charts should be inline SVG");

    // Blank selection behaves like no selection.
    let response = server.get("/videos").add_query_param("title", "").await;
    response.assert_status_ok();
    assert!(response.text().contains(r#"<option value="Data Science Roadmap" selected>"#));
}

/// Test video page for an explicit title
#[tokio::test]
async fn test_video_page_by_title() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/videos")
        .add_query_param("title", "Pandas & SQL Tips")
        .await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains(r#"<option value="Pandas &amp; SQL Tips" selected>"#));
    assert!(html.contains("1 comments"));
}

/// Test unknown title returns 404 with an error code
#[tokio::test]
async fn test_video_page_unknown_title() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .get("/videos")
        .add_query_param("title", "Never Uploaded")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND_001");
}

/// Test /api/aggregate mirrors the page data
#[tokio::test]
async fn test_api_aggregate() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/aggregate").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["metrics"].as_array().map(Vec::len), Some(10));
    assert_eq!(body["layout"]["slots"].as_array().map(Vec::len), Some(5));

    let rows = body["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["video_id"], "vid-d");
    assert_eq!(rows[3]["video_id"], "vid-a");

    let views = &body["layout"]["slots"][0][0];
    assert_eq!(views["recent_median"], 350.0);
    assert_eq!(views["baseline_median"], 250.0);
}

/// Test /api/videos lists videos newest first
#[tokio::test]
async fn test_api_videos() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/videos").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let ids: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|v| v["video_id"].as_str())
        .collect();
    assert_eq!(ids, vec!["vid-d", "vid-c", "vid-b", "vid-a"]);

    let response = server
        .get("/api/videos")
        .add_query_param("title", "Interview Prep")
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body[0]["video_id"], "vid-b");

    server
        .get("/api/videos")
        .add_query_param("title", "Nope")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// Test /api/videos/:id returns the drill-down
#[tokio::test]
async fn test_api_video_drilldown() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/videos/vid-d").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["comment_count"], 3);
    assert_eq!(body["audience"].as_array().map(Vec::len), Some(3));
    // Subscribed rows come after unsubscribed ones.
    assert_eq!(body["audience"][2]["is_subscribed"], true);

    // Days 0..=30 of the SERIES_DAYS written.
    let trajectory = body["trajectory"].as_array().expect("trajectory");
    assert!(SERIES_DAYS > 31);
    assert_eq!(trajectory.len(), 31);
    assert_eq!(trajectory[30]["cumulative_views"], 124.0);

    server
        .get("/api/videos/missing")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// Test /api/cohort reports dropped join rows and day statistics
#[tokio::test]
async fn test_api_cohort() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server.get("/api/cohort").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["dropped_rows"], 1);
    assert_eq!(body["joined_rows"], 4 * SERIES_DAYS);

    let days = body["days"].as_array().expect("days");
    assert_eq!(days.len(), 31);
    // Daily views 4, 3, 2, 1 across the four videos.
    assert_eq!(days[0]["days_published"], 0);
    assert_eq!(days[0]["median_views"], 2.5);
    assert_eq!(days[0]["mean_views"], 2.5);
}

/// Test a changed source file is picked up without restart
#[tokio::test]
async fn test_dataset_reloads_after_file_change() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let html = server.get("/aggregate").await.text();
    assert!(!html.contains("Brand New Video"));

    let mut videos = sample_channel();
    videos.insert(
        0,
        VideoFixture::new("vid-e", "Brand New Video", date(2025, 1, 15), 500),
    );
    ctx.write(VIDEO_METRICS_FILE, &video_metrics_csv(&videos));

    let html = server.get("/aggregate").await.text();
    assert!(html.contains("Brand New Video"));

    let response = server.get("/api/videos").await;
    let body: serde_json::Value = response.json();
    assert_eq!(body[0]["video_id"], "vid-e");
}
