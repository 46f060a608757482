//! Dashboard routes.

pub mod data;
pub mod health;
pub mod pages;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Creates the dashboard router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(pages::index_handler))
        .route("/aggregate", get(pages::aggregate_handler))
        .route("/videos", get(pages::video_handler))
        .route("/api/aggregate", get(data::aggregate_handler))
        .route("/api/videos", get(data::videos_handler))
        .route("/api/videos/:video_id", get(data::video_handler))
        .route("/api/cohort", get(data::cohort_handler))
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
