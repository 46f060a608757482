//! Common test setup functions.

use std::path::PathBuf;

use api::{router, AppState};
use axum::Router;
use axum_test::TestServer;
use dashboard_core::{
    DataConfig, COMMENTS_FILE, SUBSCRIBER_COUNTRY_FILE, TIME_SERIES_FILE, VIDEO_METRICS_FILE,
};
use tempfile::TempDir;

use crate::fixtures::{
    comments_csv, sample_channel, subscriber_country_csv, time_series_csv, video_metrics_csv,
    VideoFixture,
};

/// Test context: a temporary data directory and the real router over it.
pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
    pub router: Router,
}

impl TestContext {
    /// Context over the sample channel.
    pub fn new() -> Self {
        Self::with_videos(&sample_channel())
    }

    /// Context with all four files generated from `videos`.
    pub fn with_videos(videos: &[VideoFixture]) -> Self {
        let ctx = Self::empty();
        ctx.write(VIDEO_METRICS_FILE, &video_metrics_csv(videos));
        ctx.write(SUBSCRIBER_COUNTRY_FILE, &subscriber_country_csv(videos));
        ctx.write(COMMENTS_FILE, &comments_csv(videos));
        ctx.write(TIME_SERIES_FILE, &time_series_csv(videos));
        ctx
    }

    /// Context over an empty data directory.
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = DataConfig::with_data_dir(dir.path().to_string_lossy());
        let state = AppState::new(config);
        let router = router(state.clone());
        Self { dir, state, router }
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.path().join(file)
    }

    /// Write (or overwrite) one source file.
    pub fn write(&self, file: &str, contents: &str) {
        std::fs::write(self.path(file), contents).expect("Failed to write fixture");
    }

    pub fn remove(&self, file: &str) {
        std::fs::remove_file(self.path(file)).expect("Failed to remove fixture");
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router.clone()).expect("Failed to create test server")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
