//! JSON endpoints over the same tables the pages render.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use analytics::{AggregateView, DailyViewStats, EnvelopePoint, VideoDrilldown, VideoSummary};

use crate::response::ApiError;
use crate::routes::pages::VideoQuery;
use crate::state::AppState;

/// GET /api/aggregate
pub async fn aggregate_handler(State(state): State<AppState>) -> Result<Json<AggregateView>, ApiError> {
    let dashboard = state.cache.get().await?;
    Ok(Json(dashboard.aggregate.clone()))
}

/// GET /api/videos - Video list, newest first. `?title=` narrows to one drill-down.
pub async fn videos_handler(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> Result<Json<Vec<VideoSummary>>, ApiError> {
    let dashboard = state.cache.get().await?;
    let videos = dashboard.videos();

    match query.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => {
            let found: Vec<VideoSummary> = videos.into_iter().filter(|v| v.title == title).collect();
            if found.is_empty() {
                return Err(ApiError::not_found(format!("video not found: {}", title)));
            }
            Ok(Json(found))
        }
        None => Ok(Json(videos)),
    }
}

/// GET /api/videos/:video_id
pub async fn video_handler(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<VideoDrilldown>, ApiError> {
    let dashboard = state.cache.get().await?;
    Ok(Json(dashboard.drilldown_by_id(&video_id)?))
}

#[derive(Debug, Serialize)]
pub struct CohortResponse {
    /// Rows that joined to a known video
    pub joined_rows: usize,
    /// Rows whose video id was not in the metrics table
    pub dropped_rows: usize,
    pub days: Vec<DailyViewStats>,
    pub envelope: Vec<EnvelopePoint>,
}

/// GET /api/cohort - First-month view statistics for the baseline window.
pub async fn cohort_handler(State(state): State<AppState>) -> Result<Json<CohortResponse>, ApiError> {
    let dashboard = state.cache.get().await?;
    Ok(Json(CohortResponse {
        joined_rows: dashboard.joined.len(),
        dropped_rows: dashboard.joined_dropped,
        days: dashboard.cohort.clone(),
        envelope: dashboard.envelope.clone(),
    }))
}
