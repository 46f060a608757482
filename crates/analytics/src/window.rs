//! Trailing lookback windows anchored at the latest publish date.

use chrono::{Months, NaiveDate};
use serde::Serialize;

use dashboard_core::VideoRecord;

/// Months in the normalization baseline.
pub const BASELINE_MONTHS: u32 = 12;
/// Months in the short trailing window used by the KPI tiles.
pub const RECENT_MONTHS: u32 = 6;

/// Inclusive date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LookbackWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl LookbackWindow {
    /// Window of `months` calendar months ending at `end`.
    ///
    /// Month subtraction clamps to the last valid day, so March 31 minus one
    /// month is the end of February.
    pub fn ending_at(end: NaiveDate, months: u32) -> Self {
        let start = end
            .checked_sub_months(Months::new(months))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Window anchored at the newest publish date, `None` for no videos.
    pub fn for_videos(videos: &[VideoRecord], months: u32) -> Option<Self> {
        videos
            .iter()
            .map(|v| v.published)
            .max()
            .map(|latest| Self::ending_at(latest, months))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Videos published inside `window`.
pub fn videos_in<'a>(
    videos: &'a [VideoRecord],
    window: Option<LookbackWindow>,
) -> impl Iterator<Item = &'a VideoRecord> + 'a {
    videos
        .iter()
        .filter(move |v| window.is_some_and(|w| w.contains(v.published)))
}
