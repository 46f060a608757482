//! Channel-wide KPI tiles and the per-video comparison table.

use chrono::NaiveDate;
use serde::Serialize;

use dashboard_core::{Metric, VideoRecord};

use crate::normalize::{window_medians, NormalizedVideo};
use crate::window::{LookbackWindow, BASELINE_MONTHS, RECENT_MONTHS};

/// Metrics shown as tiles and table columns, in display order.
pub const TILE_METRICS: [Metric; 10] = [
    Metric::Views,
    Metric::Likes,
    Metric::Subscribers,
    Metric::Shares,
    Metric::CommentsAdded,
    Metric::RpmUsd,
    Metric::AverageViewedPct,
    Metric::AverageViewDuration,
    Metric::EngagementRatio,
    Metric::ViewsToSubscriberRatio,
];

/// Fixed number of tile columns; tiles wrap to the first column after the last.
pub const TILE_SLOTS: usize = 5;

/// One KPI tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tile {
    pub metric: Metric,
    pub label: &'static str,
    /// Median over the recent window
    pub recent_median: f64,
    /// Median over the baseline window
    pub baseline_median: f64,
    /// `(recent - baseline) / baseline`
    pub change: f64,
}

/// Tiles distributed over [`TILE_SLOTS`] columns: tile `i` sits in column
/// `i % TILE_SLOTS`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileLayout {
    pub slots: Vec<Vec<Tile>>,
}

impl TileLayout {
    pub fn cycle(tiles: Vec<Tile>) -> Self {
        let mut slots = vec![Vec::new(); TILE_SLOTS];
        for (i, tile) in tiles.into_iter().enumerate() {
            slots[i % TILE_SLOTS].push(tile);
        }
        Self { slots }
    }

    /// Tiles in their original order.
    pub fn tiles(&self) -> Vec<&Tile> {
        let rows = self.slots.iter().map(Vec::len).max().unwrap_or(0);
        (0..rows)
            .flat_map(|row| self.slots.iter().filter_map(move |slot| slot.get(row)))
            .collect()
    }
}

/// One row of the comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub video_id: String,
    pub title: String,
    pub published: NaiveDate,
    /// Normalized values of [`TILE_METRICS`], same order
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateView {
    pub metrics: Vec<&'static str>,
    pub layout: TileLayout,
    pub rows: Vec<AggregateRow>,
}

/// Builds the tiles from raw per-video values.
pub fn build_tiles(videos: &[VideoRecord]) -> Vec<Tile> {
    let recent = window_medians(videos, LookbackWindow::for_videos(videos, RECENT_MONTHS));
    let baseline = window_medians(videos, LookbackWindow::for_videos(videos, BASELINE_MONTHS));

    TILE_METRICS
        .iter()
        .map(|&metric| {
            let recent_median = recent.get(metric);
            let baseline_median = baseline.get(metric);
            Tile {
                metric,
                label: metric.label(),
                recent_median,
                baseline_median,
                change: (recent_median - baseline_median) / baseline_median,
            }
        })
        .collect()
}

pub fn build_aggregate(videos: &[VideoRecord], normalized: &[NormalizedVideo]) -> AggregateView {
    let rows = normalized
        .iter()
        .map(|row| AggregateRow {
            video_id: row.video_id.clone(),
            title: row.title.clone(),
            published: row.published,
            values: TILE_METRICS.iter().map(|&m| row.delta(m)).collect(),
        })
        .collect();

    AggregateView {
        metrics: TILE_METRICS.iter().map(|m| m.label()).collect(),
        layout: TileLayout::cycle(build_tiles(videos)),
        rows,
    }
}
