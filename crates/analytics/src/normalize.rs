//! Express every per-video metric relative to its trailing median.

use chrono::NaiveDate;
use serde::Serialize;

use dashboard_core::{Metric, MetricValues, VideoRecord};

use crate::stats;
use crate::window::{videos_in, LookbackWindow};

/// Per-metric medians over the videos inside `window`.
pub fn window_medians(videos: &[VideoRecord], window: Option<LookbackWindow>) -> MetricValues {
    let in_window: Vec<&VideoRecord> = videos_in(videos, window).collect();

    let mut medians = MetricValues::new();
    for metric in Metric::ALL {
        let samples: Vec<f64> = in_window.iter().map(|v| v.metric(metric)).collect();
        medians.set(metric, stats::median(&samples));
    }
    medians
}

/// A video whose metrics are relative deviations from the baseline median.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedVideo {
    pub video_id: String,
    pub title: String,
    pub published: NaiveDate,
    pub deltas: MetricValues,
}

impl NormalizedVideo {
    pub fn delta(&self, metric: Metric) -> f64 {
        self.deltas.get(metric)
    }
}

/// `(value - median) / median` for every metric of every video.
///
/// A zero median yields non-finite deltas; they are passed through unchanged.
pub fn normalize(videos: &[VideoRecord], medians: &MetricValues) -> Vec<NormalizedVideo> {
    videos
        .iter()
        .map(|video| {
            let mut deltas = MetricValues::new();
            for (metric, value) in video.metrics.iter() {
                let median = medians.get(metric);
                deltas.set(metric, (value - median) / median);
            }
            NormalizedVideo {
                video_id: video.video_id.clone(),
                title: video.title.clone(),
                published: video.published,
                deltas,
            }
        })
        .collect()
}
