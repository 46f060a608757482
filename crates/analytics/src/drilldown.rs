//! Single-video breakdowns: audience by subscription status and country, and
//! the first-month view trajectory.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use dashboard_core::{SubscriberCountryRecord, VideoRecord};

use crate::cohort::{EnvelopePoint, JoinedTimeSeriesRecord, COHORT_DAYS};

/// Coarse country grouping used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum CountryBucket {
    #[serde(rename = "USA")]
    Usa,
    India,
    Other,
}

impl CountryBucket {
    pub const ALL: [CountryBucket; 3] = [Self::Usa, Self::India, Self::Other];

    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "US" => Self::Usa,
            "IN" => Self::India,
            _ => Self::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Usa => "USA",
            Self::India => "India",
            Self::Other => "Other",
        }
    }
}

/// One bar segment: views for a subscription status and country bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AudienceRow {
    pub is_subscribed: bool,
    pub country: CountryBucket,
    pub views: f64,
}

/// Audience rows for one video, sorted by subscription status.
pub fn audience_rows(records: &[SubscriberCountryRecord], video_id: &str) -> Vec<AudienceRow> {
    let mut rows: Vec<AudienceRow> = records
        .iter()
        .filter(|r| r.video_id == video_id)
        .map(|r| AudienceRow {
            is_subscribed: r.is_subscribed,
            country: CountryBucket::from_code(&r.country_code),
            views: r.views,
        })
        .collect();
    rows.sort_by_key(|r| r.is_subscribed);
    rows
}

/// Views per (subscription status, country bucket), as stacked in the bar chart.
pub fn stacked_audience(rows: &[AudienceRow]) -> BTreeMap<(bool, CountryBucket), f64> {
    let mut totals = BTreeMap::new();
    for row in rows {
        if row.views.is_nan() {
            continue;
        }
        *totals.entry((row.is_subscribed, row.country)).or_insert(0.0) += row.views;
    }
    totals
}

/// Cumulative views of one video on a given day since publication.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectoryPoint {
    pub days_published: i64,
    pub views: f64,
    pub cumulative_views: f64,
}

/// First-month trajectory of one video, ascending by day.
///
/// A blank (NaN) day keeps its own `views` but adds nothing to the running
/// total, so one missing cell does not blank the rest of the line.
pub fn trajectory(rows: &[JoinedTimeSeriesRecord], video_id: &str) -> Vec<TrajectoryPoint> {
    let mut days: Vec<&JoinedTimeSeriesRecord> = rows
        .iter()
        .filter(|r| r.video_id == video_id && (0..=COHORT_DAYS).contains(&r.days_published))
        .collect();
    days.sort_by_key(|r| r.days_published);

    let mut total = 0.0;
    days.into_iter()
        .map(|r| {
            if r.views.is_finite() {
                total += r.views;
            }
            TrajectoryPoint {
                days_published: r.days_published,
                views: r.views,
                cumulative_views: total,
            }
        })
        .collect()
}

/// Everything the drill-down page shows for one video.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoDrilldown {
    pub video_id: String,
    pub title: String,
    pub published: NaiveDate,
    pub comment_count: usize,
    pub audience: Vec<AudienceRow>,
    pub trajectory: Vec<TrajectoryPoint>,
    pub envelope: Vec<EnvelopePoint>,
}

impl VideoDrilldown {
    pub fn build(
        video: &VideoRecord,
        audience_records: &[SubscriberCountryRecord],
        joined: &[JoinedTimeSeriesRecord],
        envelope: &[EnvelopePoint],
        comment_count: usize,
    ) -> Self {
        Self {
            video_id: video.video_id.clone(),
            title: video.title.clone(),
            published: video.published,
            comment_count,
            audience: audience_rows(audience_records, &video.video_id),
            trajectory: trajectory(joined, &video.video_id),
            envelope: envelope.to_vec(),
        }
    }
}
