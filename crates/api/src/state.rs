//! Application state shared across handlers.

use std::sync::Arc;
use std::time::{Instant, SystemTime};

use analytics::Dashboard;
use dashboard_core::{
    load_dataset, DataConfig, Error, COMMENTS_FILE, SUBSCRIBER_COUNTRY_FILE, TIME_SERIES_FILE,
    VIDEO_METRICS_FILE,
};
use moka::future::Cache;
use telemetry::{health, metrics};
use tracing::{debug, error, info};

const SOURCE_FILES: [&str; 4] = [
    VIDEO_METRICS_FILE,
    SUBSCRIBER_COUNTRY_FILE,
    COMMENTS_FILE,
    TIME_SERIES_FILE,
];

/// Modification time and size of each source file; `None` when unreadable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceFingerprint([Option<(SystemTime, u64)>; 4]);

impl SourceFingerprint {
    pub async fn of(config: &DataConfig) -> Self {
        let mut entries = [None; 4];
        for (entry, file) in entries.iter_mut().zip(SOURCE_FILES) {
            if let Ok(meta) = tokio::fs::metadata(config.path_of(file)).await {
                *entry = meta.modified().ok().map(|modified| (modified, meta.len()));
            }
        }
        Self(entries)
    }
}

/// Memoized dashboard keyed by the source files' fingerprint.
///
/// Holds at most one generation. A request that sees a new fingerprint
/// triggers one reload; concurrent requests wait on it. Failed loads are not
/// cached.
#[derive(Clone)]
pub struct DatasetCache {
    config: Arc<DataConfig>,
    cache: Cache<SourceFingerprint, Arc<Dashboard>>,
}

impl DatasetCache {
    pub fn new(config: DataConfig) -> Self {
        Self {
            config: Arc::new(config),
            cache: Cache::builder().max_capacity(1).build(),
        }
    }

    pub fn config(&self) -> &DataConfig {
        &self.config
    }

    /// Current dashboard, reloading when any source file changed.
    pub async fn get(&self) -> Result<Arc<Dashboard>, Arc<Error>> {
        let fingerprint = SourceFingerprint::of(&self.config).await;

        if let Some(cached) = self.cache.get(&fingerprint).await {
            debug!("Dataset cache hit");
            metrics().cache_hits.inc();
            return Ok(cached);
        }

        metrics().cache_misses.inc();
        let config = self.config.clone();
        self.cache
            .try_get_with(fingerprint, load_dashboard(config))
            .await
    }
}

async fn load_dashboard(config: Arc<DataConfig>) -> Result<Arc<Dashboard>, Error> {
    let started = Instant::now();

    let result = tokio::task::spawn_blocking(move || load_dataset(&config).map(Dashboard::build))
        .await
        .map_err(|e| Error::internal(format!("dataset load task failed: {}", e)))
        .and_then(|built| built);

    let elapsed_ms = started.elapsed().as_millis() as u64;
    metrics().load_latency_ms.observe(elapsed_ms);

    match result {
        Ok(dashboard) => {
            metrics().dataset_loads.inc();
            health().dataset_loaded(dashboard.dataset.videos.len());
            info!(elapsed_ms, "Dataset cache refreshed");
            Ok(Arc::new(dashboard))
        }
        Err(e) => {
            metrics().dataset_load_failures.inc();
            health().dataset_failed(e.to_string());
            error!(error = %e, "Dataset load failed");
            Err(e)
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub cache: DatasetCache,
}

impl AppState {
    pub fn new(config: DataConfig) -> Self {
        Self {
            cache: DatasetCache::new(config),
        }
    }
}
