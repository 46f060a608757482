//! First-month view trajectories across recent videos.
//!
//! Time-series rows are joined to their video's publish date, grouped by days
//! since publication, and summarised into a percentile envelope that a single
//! video's cumulative views can be compared against.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use dashboard_core::{TimeSeriesRecord, VideoRecord};
use telemetry::metrics;

use crate::stats::Summary;
use crate::window::LookbackWindow;

/// Last day of the cohort comparison, inclusive.
pub const COHORT_DAYS: i64 = 30;

/// A time-series row with its video's publish date attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedTimeSeriesRecord {
    pub date: NaiveDate,
    pub video_id: String,
    pub video_title: String,
    pub views: f64,
    pub published: NaiveDate,
    pub days_published: i64,
}

/// Result of joining time-series rows to videos.
#[derive(Debug, Clone, Default)]
pub struct JoinOutcome {
    pub rows: Vec<JoinedTimeSeriesRecord>,
    /// Rows whose video id matched no video
    pub dropped: usize,
}

/// Inner join on video id. Unmatched rows are dropped and counted.
pub fn join_publish_dates(time_series: &[TimeSeriesRecord], videos: &[VideoRecord]) -> JoinOutcome {
    let published: HashMap<&str, NaiveDate> = videos
        .iter()
        .map(|v| (v.video_id.as_str(), v.published))
        .collect();

    let mut outcome = JoinOutcome::default();
    for row in time_series {
        match published.get(row.video_id.as_str()) {
            Some(&publish_date) => outcome.rows.push(JoinedTimeSeriesRecord {
                date: row.date,
                video_id: row.video_id.clone(),
                video_title: row.video_title.clone(),
                views: row.views,
                published: publish_date,
                days_published: (row.date - publish_date).num_days(),
            }),
            None => outcome.dropped += 1,
        }
    }

    if outcome.dropped > 0 {
        warn!(
            dropped = outcome.dropped,
            kept = outcome.rows.len(),
            "Dropped time-series rows with no matching video"
        );
        metrics().join_rows_dropped.inc_by(outcome.dropped as u64);
    }

    outcome
}

/// View statistics for one `days_published` value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyViewStats {
    pub days_published: i64,
    pub mean_views: f64,
    pub median_views: f64,
    pub p80_views: f64,
    pub p20_views: f64,
}

/// Groups rows by `days_published` and summarises views, keeping days
/// `0..=max_day` in ascending order.
pub fn pivot_by_day(rows: &[JoinedTimeSeriesRecord], max_day: i64) -> Vec<DailyViewStats> {
    let mut by_day: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for row in rows {
        by_day.entry(row.days_published).or_default().push(row.views);
    }

    by_day
        .range(0..=max_day)
        .map(|(&day, views)| {
            let summary = Summary::of(views);
            DailyViewStats {
                days_published: day,
                mean_views: summary.mean,
                median_views: summary.median,
                p80_views: summary.p80,
                p20_views: summary.p20,
            }
        })
        .collect()
}

/// Rows of videos published inside `window`.
pub fn rows_published_in(
    rows: &[JoinedTimeSeriesRecord],
    window: Option<LookbackWindow>,
) -> Vec<JoinedTimeSeriesRecord> {
    rows.iter()
        .filter(|r| window.is_some_and(|w| w.contains(r.published)))
        .cloned()
        .collect()
}

/// Running totals of the daily median and percentiles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvelopePoint {
    pub days_published: i64,
    pub median_views: f64,
    pub p80_views: f64,
    pub p20_views: f64,
}

/// Cumulative sums over the pivot, which is already in ascending day order.
pub fn cumulative_envelope(pivot: &[DailyViewStats]) -> Vec<EnvelopePoint> {
    let mut median = 0.0;
    let mut p80 = 0.0;
    let mut p20 = 0.0;

    pivot
        .iter()
        .map(|day| {
            median += day.median_views;
            p80 += day.p80_views;
            p20 += day.p20_views;
            EnvelopePoint {
                days_published: day.days_published,
                median_views: median,
                p80_views: p80,
                p20_views: p20,
            }
        })
        .collect()
}
