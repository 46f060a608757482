//! CSV fixture generators for the four channel exports.

use chrono::{Duration, NaiveDate};
use dashboard_core::schema::{comment_columns, subscriber_columns, time_series_columns};
use dashboard_core::VIDEO_COLUMNS;

/// Date layout of the exports.
pub const DATE_FORMAT: &str = "%b %d, %Y";

/// Days of time-series rows written per video.
pub const SERIES_DAYS: i64 = 35;

/// One video of a fixture channel. Other metrics derive from `views`.
#[derive(Debug, Clone)]
pub struct VideoFixture {
    pub id: String,
    pub title: String,
    pub published: NaiveDate,
    pub views: u64,
    pub comments: usize,
}

impl VideoFixture {
    pub fn new(id: &str, title: &str, published: NaiveDate, views: u64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            published,
            views,
            comments: 0,
        }
    }

    pub fn with_comments(mut self, comments: usize) -> Self {
        self.comments = comments;
        self
    }

    fn likes(&self) -> u64 {
        self.views / 10
    }

    fn subscribers_gained(&self) -> u64 {
        self.views / 50
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// Four videos, newest first. Views double as the expected medians:
/// recent six months {400, 300}, twelve months {400, 300, 200, 100}.
pub fn sample_channel() -> Vec<VideoFixture> {
    vec![
        VideoFixture::new("vid-d", "Data Science Roadmap", date(2024, 12, 1), 400).with_comments(3),
        VideoFixture::new("vid-c", "Pandas & SQL Tips", date(2024, 9, 1), 300).with_comments(1),
        VideoFixture::new("vid-b", "Interview Prep", date(2024, 4, 1), 200),
        VideoFixture::new("vid-a", "First Upload", date(2024, 2, 1), 100),
    ]
}

fn write_rows(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers).expect("write header");
    for row in rows {
        writer.write_record(&row).expect("write row");
    }
    let bytes = writer.into_inner().expect("flush csv");
    String::from_utf8(bytes).expect("utf-8 csv")
}

fn video_row(v: &VideoFixture) -> Vec<String> {
    let views = v.views as f64;
    vec![
        v.id.clone(),
        v.title.clone(),
        v.published.format(DATE_FORMAT).to_string(),
        v.comments.to_string(),
        "1".into(),
        "0".into(),
        v.likes().to_string(),
        "1".into(),
        v.subscribers_gained().to_string(),
        "3.5".into(),
        "7.0".into(),
        "45.0".into(),
        "0:04:10".into(),
        v.views.to_string(),
        format!("{:.1}", views * 0.07),
        (v.subscribers_gained().saturating_sub(1)).to_string(),
        format!("{:.2}", views * 0.0035),
        (v.views * 10).to_string(),
        "5.5".into(),
    ]
}

/// Per-video metrics file, channel total row first.
pub fn video_metrics_csv(videos: &[VideoFixture]) -> String {
    let total_views: u64 = videos.iter().map(|v| v.views).sum();
    let mut total = vec![String::new(); VIDEO_COLUMNS.len()];
    total[0] = "Total".into();
    total[13] = total_views.to_string();

    let mut rows = vec![total];
    rows.extend(videos.iter().map(video_row));
    write_rows(&VIDEO_COLUMNS, rows)
}

/// Same as [`video_metrics_csv`] with an extra trailing column.
pub fn video_metrics_csv_with_extra_column(videos: &[VideoFixture]) -> String {
    let mut headers: Vec<&str> = VIDEO_COLUMNS.to_vec();
    headers.push("Extra");
    let rows = videos
        .iter()
        .map(|v| {
            let mut row = video_row(v);
            row.push("0".into());
            row
        })
        .collect();
    write_rows(&headers, rows)
}

/// Views split 60/30/10 over subscribed US, unsubscribed IN, unsubscribed DE.
pub fn subscriber_country_csv(videos: &[VideoFixture]) -> String {
    let rows = videos
        .iter()
        .flat_map(|v| {
            [("US", "True", 6), ("IN", "False", 3), ("DE", "False", 1)]
                .into_iter()
                .map(move |(country, subscribed, tenths)| {
                    vec![
                        v.title.clone(),
                        v.id.clone(),
                        country.to_string(),
                        subscribed.to_string(),
                        (v.views * tenths / 10).to_string(),
                    ]
                })
        })
        .collect();

    write_rows(
        &[
            subscriber_columns::VIDEO_TITLE,
            subscriber_columns::VIDEO_ID,
            subscriber_columns::COUNTRY_CODE,
            subscriber_columns::IS_SUBSCRIBED,
            subscriber_columns::VIEWS,
        ],
        rows,
    )
}

pub fn comments_csv(videos: &[VideoFixture]) -> String {
    let rows = videos
        .iter()
        .flat_map(|v| (0..v.comments).map(move |i| vec![v.id.clone(), format!("comment {i}, thanks")]))
        .collect();
    write_rows(&[comment_columns::VIDEO_ID, comment_columns::TEXT], rows)
}

/// [`SERIES_DAYS`] daily rows per video from its publish date, plus one row
/// for a video missing from the metrics file.
pub fn time_series_csv(videos: &[VideoFixture]) -> String {
    let mut rows: Vec<Vec<String>> = videos
        .iter()
        .flat_map(|v| {
            (0..SERIES_DAYS).map(move |day| {
                vec![
                    (v.published + Duration::days(day)).format(DATE_FORMAT).to_string(),
                    v.id.clone(),
                    v.title.clone(),
                    (v.views / 100).to_string(),
                ]
            })
        })
        .collect();

    rows.push(vec![
        date(2024, 6, 1).format(DATE_FORMAT).to_string(),
        "vid-removed".into(),
        "Removed Video".into(),
        "7".into(),
    ]);

    write_rows(
        &[
            time_series_columns::DATE,
            time_series_columns::VIDEO_ID,
            time_series_columns::VIDEO_TITLE,
            time_series_columns::VIEWS,
        ],
        rows,
    )
}
