//! HTML dashboard pages.

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use telemetry::metrics;
use tracing::debug;

use crate::response::ApiError;
use crate::state::AppState;
use crate::views::pages::{render_aggregate, render_video};

#[derive(Debug, Default, Deserialize)]
pub struct VideoQuery {
    pub title: Option<String>,
}

impl VideoQuery {
    /// Selected title; blank means "newest video".
    fn title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }
}

/// GET / - Lands on the aggregate view.
pub async fn index_handler() -> Redirect {
    Redirect::to("/aggregate")
}

/// GET /aggregate - KPI tiles and the normalized comparison table.
pub async fn aggregate_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let dashboard = state.cache.get().await?;
    metrics().page_renders.inc();
    Ok(Html(render_aggregate(&dashboard)))
}

/// GET /videos?title= - Drill-down for one video.
pub async fn video_handler(
    State(state): State<AppState>,
    Query(query): Query<VideoQuery>,
) -> Result<Html<String>, ApiError> {
    let dashboard = state.cache.get().await?;
    let drilldown = dashboard.drilldown_by_title(query.title())?;
    debug!(video_id = %drilldown.video_id, "Rendering video page");

    metrics().page_renders.inc();
    Ok(Html(render_video(&dashboard.videos(), &drilldown)))
}
