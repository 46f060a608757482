//! Everything derived from one loaded dataset.

use std::collections::HashMap;

use serde::Serialize;
use tracing::info;

use dashboard_core::{Dataset, Error, MetricValues, Result, VideoRecord};

use crate::aggregate::{build_aggregate, AggregateView};
use crate::cohort::{
    cumulative_envelope, join_publish_dates, pivot_by_day, rows_published_in, DailyViewStats,
    EnvelopePoint, JoinedTimeSeriesRecord, COHORT_DAYS,
};
use crate::drilldown::VideoDrilldown;
use crate::normalize::{normalize, window_medians, NormalizedVideo};
use crate::window::{LookbackWindow, BASELINE_MONTHS};

/// Title list entry for the video selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoSummary {
    pub video_id: String,
    pub title: String,
    pub published: chrono::NaiveDate,
}

/// A loaded dataset plus every table the pages read from.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub dataset: Dataset,
    pub baseline_window: Option<LookbackWindow>,
    pub baseline_medians: MetricValues,
    pub normalized: Vec<NormalizedVideo>,
    /// Time series joined to publish dates, all videos
    pub joined: Vec<JoinedTimeSeriesRecord>,
    pub joined_dropped: usize,
    /// First-month statistics over videos in the baseline window
    pub cohort: Vec<DailyViewStats>,
    pub envelope: Vec<EnvelopePoint>,
    pub aggregate: AggregateView,
    comment_counts: HashMap<String, usize>,
}

impl Dashboard {
    pub fn build(dataset: Dataset) -> Self {
        let baseline_window = LookbackWindow::for_videos(&dataset.videos, BASELINE_MONTHS);
        let baseline_medians = window_medians(&dataset.videos, baseline_window);
        let normalized = normalize(&dataset.videos, &baseline_medians);

        let join = join_publish_dates(&dataset.time_series, &dataset.videos);
        let recent_rows = rows_published_in(&join.rows, baseline_window);
        let cohort = pivot_by_day(&recent_rows, COHORT_DAYS);
        let envelope = cumulative_envelope(&cohort);

        let aggregate = build_aggregate(&dataset.videos, &normalized);

        let mut comment_counts: HashMap<String, usize> = HashMap::new();
        for comment in &dataset.comments {
            *comment_counts.entry(comment.video_id.clone()).or_default() += 1;
        }

        info!(
            videos = dataset.videos.len(),
            joined_rows = join.rows.len(),
            cohort_rows = recent_rows.len(),
            cohort_days = cohort.len(),
            "Dashboard tables built"
        );

        Self {
            dataset,
            baseline_window,
            baseline_medians,
            normalized,
            joined: join.rows,
            joined_dropped: join.dropped,
            cohort,
            envelope,
            aggregate,
            comment_counts,
        }
    }

    /// Videos newest first.
    pub fn videos(&self) -> Vec<VideoSummary> {
        self.dataset
            .videos
            .iter()
            .map(|v| VideoSummary {
                video_id: v.video_id.clone(),
                title: v.title.clone(),
                published: v.published,
            })
            .collect()
    }

    pub fn comment_count(&self, video_id: &str) -> usize {
        self.comment_counts.get(video_id).copied().unwrap_or(0)
    }

    fn drilldown_for(&self, video: &VideoRecord) -> VideoDrilldown {
        VideoDrilldown::build(
            video,
            &self.dataset.subscriber_country,
            &self.joined,
            &self.envelope,
            self.comment_count(&video.video_id),
        )
    }

    /// Drill-down for the first video with `title`, or the newest video when
    /// no title is given.
    pub fn drilldown_by_title(&self, title: Option<&str>) -> Result<VideoDrilldown> {
        let video = match title {
            Some(title) => self.dataset.video_by_title(title),
            None => self.dataset.videos.first(),
        };
        video
            .map(|v| self.drilldown_for(v))
            .ok_or_else(|| Error::video_not_found(title.unwrap_or("<none>")))
    }

    pub fn drilldown_by_id(&self, video_id: &str) -> Result<VideoDrilldown> {
        self.dataset
            .video_by_id(video_id)
            .map(|v| self.drilldown_for(v))
            .ok_or_else(|| Error::video_not_found(video_id))
    }
}
