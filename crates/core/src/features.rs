//! Derived per-video columns.

use crate::config::EngagementFormula;
use crate::schema::{Metric, MetricValues, VideoRecord};

/// Engagement ratio for one row.
pub fn engagement_ratio(values: &MetricValues, formula: EngagementFormula) -> f64 {
    let comments = values.get(Metric::CommentsAdded);
    let shares = values.get(Metric::Shares);
    let dislikes = values.get(Metric::Dislikes);
    let likes = values.get(Metric::Likes);
    let views = values.get(Metric::Views);

    match formula {
        EngagementFormula::Legacy => comments + shares + dislikes + likes / views,
        EngagementFormula::Corrected => (comments + shares + dislikes + likes) / views,
    }
}

/// Views needed per subscriber gained. IEEE division: zero gained gives inf.
pub fn views_to_subscriber_ratio(values: &MetricValues) -> f64 {
    values.get(Metric::Views) / values.get(Metric::SubscribersGained)
}

/// Fills the derived metrics on a record.
pub fn derive(record: &mut VideoRecord, formula: EngagementFormula) {
    let engagement = engagement_ratio(&record.metrics, formula);
    let views_per_sub = views_to_subscriber_ratio(&record.metrics);
    record.metrics.set(Metric::EngagementRatio, engagement);
    record.metrics.set(Metric::ViewsToSubscriberRatio, views_per_sub);
}

/// Stable sort, newest publish date first.
pub fn sort_newest_first(videos: &mut [VideoRecord]) {
    videos.sort_by(|a, b| b.published.cmp(&a.published));
}
