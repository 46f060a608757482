//! Tests for dataset load failures.
//!
//! A load failure aborts the request with a 500 and a stable error code, and
//! is never cached: fixing the files recovers without restart.

use axum::http::StatusCode;
use api::DatasetCache;
use dashboard_core::{DataConfig, Error, COMMENTS_FILE, TIME_SERIES_FILE, VIDEO_METRICS_FILE};
use integration_tests::fixtures::{
    date, sample_channel, video_metrics_csv, video_metrics_csv_with_extra_column, VideoFixture,
};
use integration_tests::setup::TestContext;

async fn assert_load_error(ctx: &TestContext, expected_code: &str) {
    let server = ctx.server();
    let response = server.get("/aggregate").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], expected_code, "unexpected body: {}", body);
}

/// Test a missing source file returns DATA_001
#[tokio::test]
async fn test_missing_file() {
    let ctx = TestContext::new();
    ctx.remove(TIME_SERIES_FILE);

    assert_load_error(&ctx, "DATA_001").await;
}

/// Test an empty data directory returns DATA_001 on every page
#[tokio::test]
async fn test_empty_directory() {
    let ctx = TestContext::empty();
    let server = ctx.server();

    for path in ["/aggregate", "/videos", "/api/aggregate", "/api/cohort"] {
        let response = server.get(path).await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "DATA_001", "{}", path);
    }
}

/// Test a per-video file with the wrong column count returns DATA_002
#[tokio::test]
async fn test_wrong_column_count() {
    let ctx = TestContext::new();
    ctx.write(
        VIDEO_METRICS_FILE,
        &video_metrics_csv_with_extra_column(&sample_channel()),
    );

    assert_load_error(&ctx, "DATA_002").await;

    let err = ctx.state.cache.get().await.unwrap_err();
    assert!(matches!(
        err.as_ref(),
        Error::ColumnCount {
            expected: 19,
            found: 20,
            ..
        }
    ));
}

/// Test a repeated video id returns DATA_002
#[tokio::test]
async fn test_duplicate_video_id() {
    let mut videos = sample_channel();
    let mut copy = videos[0].clone();
    copy.title = "Re-upload".into();
    videos.push(copy);

    let ctx = TestContext::with_videos(&videos);
    assert_load_error(&ctx, "DATA_002").await;
}

/// Test a ragged comments row returns DATA_002
#[tokio::test]
async fn test_ragged_csv_row() {
    let ctx = TestContext::new();
    ctx.write(COMMENTS_FILE, "VidId,Comments\nvid-d,great,extra\n");

    assert_load_error(&ctx, "DATA_002").await;
}

/// Test a publish date in another layout returns DATA_003
#[tokio::test]
async fn test_unparseable_publish_date() {
    let ctx = TestContext::new();
    let config = DataConfig {
        publish_time_format: "%Y-%m-%d".into(),
        ..DataConfig::with_data_dir(ctx.dir.path().to_string_lossy())
    };
    let cache = DatasetCache::new(config);

    let err = cache.get().await.unwrap_err();
    assert_eq!(err.error_code(), "DATA_003");
    match err.as_ref() {
        Error::Parse { column, .. } => assert_eq!(column, "Video publish time"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

/// Test a failed load is retried once the files are fixed
#[tokio::test]
async fn test_recovers_after_fix() {
    let ctx = TestContext::new();
    ctx.write(
        VIDEO_METRICS_FILE,
        &video_metrics_csv_with_extra_column(&sample_channel()),
    );
    assert_load_error(&ctx, "DATA_002").await;

    let mut videos = sample_channel();
    videos.push(VideoFixture::new("vid-0", "Channel Trailer", date(2023, 6, 1), 50));
    ctx.write(VIDEO_METRICS_FILE, &video_metrics_csv(&videos));

    let server = ctx.server();
    let response = server.get("/aggregate").await;
    response.assert_status_ok();
    assert!(response.text().contains("Channel Trailer"));
}
