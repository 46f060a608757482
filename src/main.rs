//! YouTube Channel Analytics Dashboard
//!
//! Serves two views over a channel's CSV exports:
//! - Aggregate metrics: recent vs. baseline medians and a normalized per-video table
//! - Individual video analysis: audience breakdown and first-month view trajectory

use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};
use tokio::signal;
use tracing::{error, info};

use api::{router, AppState};
use dashboard_core::{DataConfig, EngagementFormula};
use telemetry::init_tracing_from_env;

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    #[serde(default)]
    data: DataConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data: DataConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting channel dashboard v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    config
        .data
        .check()
        .context("Invalid data configuration")?;

    info!(
        data_dir = %config.data.data_dir,
        publish_time_format = %config.data.publish_time_format,
        engagement_formula = ?config.data.engagement_formula,
        "Loaded data config"
    );

    let state = AppState::new(config.data.clone());

    // Abort startup if the dataset does not load.
    let dashboard = state
        .cache
        .get()
        .await
        .map_err(|e| anyhow!("{} [{}]", e, e.error_code()))
        .context("Failed to load dataset")?;

    info!(
        videos = dashboard.dataset.videos.len(),
        time_series_rows = dashboard.dataset.time_series.len(),
        dropped_rows = dashboard.joined_dropped,
        "Dataset ready"
    );

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("DASHBOARD")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Flat names for the nested data section; the nested `__` form is awkward
    // with underscored field names.
    if let Ok(dir) = std::env::var("DASHBOARD_DATA_DIR") {
        config.data.data_dir = dir;
    }
    if let Ok(format) = std::env::var("DASHBOARD_PUBLISH_TIME_FORMAT") {
        config.data.publish_time_format = format;
    }
    if let Ok(format) = std::env::var("DASHBOARD_TIME_SERIES_DATE_FORMAT") {
        config.data.time_series_date_format = format;
    }
    if let Ok(formula) = std::env::var("DASHBOARD_ENGAGEMENT_FORMULA") {
        config.data.engagement_formula =
            serde_json::from_value::<EngagementFormula>(serde_json::Value::String(
                formula.to_lowercase(),
            ))
            .with_context(|| format!("Unknown engagement formula '{}'", formula))?;
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
