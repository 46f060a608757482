//! Typed rows for the four source tables and their column contracts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Source file holding one row per video.
pub const VIDEO_METRICS_FILE: &str = "Aggregated_Metrics_By_Video.csv";
/// Source file holding views per (video, country, subscription status).
pub const SUBSCRIBER_COUNTRY_FILE: &str =
    "Aggregated_Metrics_By_Country_And_Subscriber_Status.csv";
/// Source file holding one row per comment.
pub const COMMENTS_FILE: &str = "All_Comments_Final.csv";
/// Source file holding daily views per video.
pub const TIME_SERIES_FILE: &str = "Video_Performance_Over_Time.csv";

/// Canonical column names of the per-video file, in source order.
///
/// Columns are renamed by position, so the raw header count must match.
pub const VIDEO_COLUMNS: [&str; 19] = [
    "Video",
    "Video title",
    "Video publish time",
    "Comments added",
    "Shares",
    "Dislikes",
    "Likes",
    "Subscribers lost",
    "Subscribers gained",
    "RPM (USD)",
    "CPM (USD)",
    "Average % viewed",
    "Average view duration",
    "Views",
    "Watch time (hours)",
    "Subscribers",
    "Your estimated revenue (USD)",
    "Impressions",
    "Impressions CTR(%)",
];

pub const COL_VIDEO_ID: usize = 0;
pub const COL_VIDEO_TITLE: usize = 1;
pub const COL_PUBLISH_TIME: usize = 2;

/// Required headers of the subscriber/country file.
pub mod subscriber_columns {
    pub const VIDEO_TITLE: &str = "Video Title";
    pub const VIDEO_ID: &str = "External Video ID";
    pub const COUNTRY_CODE: &str = "Country Code";
    pub const IS_SUBSCRIBED: &str = "Is Subscribed";
    pub const VIEWS: &str = "Views";
}

/// Required headers of the comments file.
pub mod comment_columns {
    pub const VIDEO_ID: &str = "VidId";
    pub const TEXT: &str = "Comments";
}

/// Required headers of the time-series file.
pub mod time_series_columns {
    pub const DATE: &str = "Date";
    pub const VIDEO_ID: &str = "External Video ID";
    pub const VIDEO_TITLE: &str = "Video Title";
    pub const VIEWS: &str = "Views";
}

/// Numeric per-video metric.
///
/// The first sixteen variants map to source columns; the last two are derived
/// at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CommentsAdded,
    Shares,
    Dislikes,
    Likes,
    SubscribersLost,
    SubscribersGained,
    RpmUsd,
    CpmUsd,
    AverageViewedPct,
    AverageViewDuration,
    Views,
    WatchTimeHours,
    Subscribers,
    EstimatedRevenueUsd,
    Impressions,
    ImpressionsCtr,
    EngagementRatio,
    ViewsToSubscriberRatio,
}

impl Metric {
    pub const COUNT: usize = 18;

    pub const ALL: [Metric; Self::COUNT] = [
        Self::CommentsAdded,
        Self::Shares,
        Self::Dislikes,
        Self::Likes,
        Self::SubscribersLost,
        Self::SubscribersGained,
        Self::RpmUsd,
        Self::CpmUsd,
        Self::AverageViewedPct,
        Self::AverageViewDuration,
        Self::Views,
        Self::WatchTimeHours,
        Self::Subscribers,
        Self::EstimatedRevenueUsd,
        Self::Impressions,
        Self::ImpressionsCtr,
        Self::EngagementRatio,
        Self::ViewsToSubscriberRatio,
    ];

    /// Metrics read directly from the per-video file, paired with their
    /// column position.
    pub const SOURCE: [(Metric, usize); 16] = [
        (Self::CommentsAdded, 3),
        (Self::Shares, 4),
        (Self::Dislikes, 5),
        (Self::Likes, 6),
        (Self::SubscribersLost, 7),
        (Self::SubscribersGained, 8),
        (Self::RpmUsd, 9),
        (Self::CpmUsd, 10),
        (Self::AverageViewedPct, 11),
        (Self::AverageViewDuration, 12),
        (Self::Views, 13),
        (Self::WatchTimeHours, 14),
        (Self::Subscribers, 15),
        (Self::EstimatedRevenueUsd, 16),
        (Self::Impressions, 17),
        (Self::ImpressionsCtr, 18),
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::CommentsAdded => "Comments added",
            Self::Shares => "Shares",
            Self::Dislikes => "Dislikes",
            Self::Likes => "Likes",
            Self::SubscribersLost => "Subscribers lost",
            Self::SubscribersGained => "Subscribers gained",
            Self::RpmUsd => "RPM (USD)",
            Self::CpmUsd => "CPM (USD)",
            Self::AverageViewedPct => "Average % viewed",
            Self::AverageViewDuration => "Average view duration",
            Self::Views => "Views",
            Self::WatchTimeHours => "Watch time (hours)",
            Self::Subscribers => "Subscribers",
            Self::EstimatedRevenueUsd => "Your estimated revenue (USD)",
            Self::Impressions => "Impressions",
            Self::ImpressionsCtr => "Impressions CTR(%)",
            Self::EngagementRatio => "Engagement ratio",
            Self::ViewsToSubscriberRatio => "Views to subscriber ratio",
        }
    }
}

/// Values for every [`Metric`], indexed by [`Metric::index`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricValues([f64; Metric::COUNT]);

impl MetricValues {
    pub fn new() -> Self {
        Self([f64::NAN; Metric::COUNT])
    }

    pub fn get(&self, metric: Metric) -> f64 {
        self.0[metric.index()]
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        self.0[metric.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.iter().map(move |&m| (m, self.get(m)))
    }
}

impl Default for MetricValues {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of the per-video file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub published: NaiveDate,
    pub metrics: MetricValues,
}

impl VideoRecord {
    pub fn metric(&self, metric: Metric) -> f64 {
        self.metrics.get(metric)
    }
}

/// Views for one (video, country, subscription status) triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriberCountryRecord {
    pub video_title: String,
    pub video_id: String,
    /// Empty when the source cell is blank.
    pub country_code: String,
    pub is_subscribed: bool,
    pub views: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub video_id: String,
    pub text: String,
}

/// Daily views for one video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRecord {
    pub date: NaiveDate,
    pub video_id: String,
    pub video_title: String,
    pub views: f64,
}

/// The four source tables after loading and feature engineering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Sorted by publish date, newest first.
    pub videos: Vec<VideoRecord>,
    pub subscriber_country: Vec<SubscriberCountryRecord>,
    pub comments: Vec<CommentRecord>,
    pub time_series: Vec<TimeSeriesRecord>,
}

impl Dataset {
    /// Latest publish date across all videos.
    pub fn latest_publish_date(&self) -> Option<NaiveDate> {
        self.videos.iter().map(|v| v.published).max()
    }

    /// First video with the given title, newest first.
    pub fn video_by_title(&self, title: &str) -> Option<&VideoRecord> {
        self.videos.iter().find(|v| v.title == title)
    }

    pub fn video_by_id(&self, video_id: &str) -> Option<&VideoRecord> {
        self.videos.iter().find(|v| v.video_id == video_id)
    }
}
