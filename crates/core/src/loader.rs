//! CSV loading and feature engineering.
//!
//! Reads the four exports from the configured data directory, validates their
//! column contracts, coerces types, and fills the derived per-video columns.
//! Any failure aborts the whole load; there is no partial result.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::config::DataConfig;
use crate::error::{Error, Result};
use crate::features;
use crate::parse;
use crate::schema::{
    comment_columns, subscriber_columns, time_series_columns, CommentRecord, Dataset, Metric,
    MetricValues, SubscriberCountryRecord, TimeSeriesRecord, VideoRecord, COL_PUBLISH_TIME,
    COL_VIDEO_ID, COL_VIDEO_TITLE, COMMENTS_FILE, SUBSCRIBER_COUNTRY_FILE, TIME_SERIES_FILE,
    VIDEO_COLUMNS, VIDEO_METRICS_FILE,
};

/// A CSV file read into memory with its header row.
struct CsvTable {
    file: String,
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl CsvTable {
    fn read(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| Error::csv(path, e))?
            .clone();

        let rows = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::csv(path, e))?;

        let file = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!(file = %file, rows = rows.len(), "Read CSV");

        Ok(Self {
            file,
            headers,
            rows,
        })
    }

    /// Position of a required header.
    fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::missing_column(&self.file, name))
    }

    fn parse_error(
        &self,
        record: &StringRecord,
        column: &str,
        value: &str,
        reason: String,
    ) -> Error {
        Error::Parse {
            file: self.file.clone(),
            row: record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or_default(),
            column: column.to_string(),
            value: value.to_string(),
            reason,
        }
    }

    /// Parses one cell, attaching file/row/column context on failure.
    fn cell<T>(
        &self,
        record: &StringRecord,
        index: usize,
        column: &str,
        parser: impl FnOnce(&str) -> std::result::Result<T, String>,
    ) -> Result<T> {
        let raw = record.get(index).unwrap_or_default();
        parser(raw).map_err(|reason| self.parse_error(record, column, raw, reason))
    }

    fn text(record: &StringRecord, index: usize) -> String {
        record.get(index).unwrap_or_default().trim().to_string()
    }
}

/// Loads all four source tables.
pub fn load_dataset(config: &DataConfig) -> Result<Dataset> {
    config.check()?;

    let started = Instant::now();
    info!(data_dir = %config.data_dir, "Loading dataset");

    let videos = load_videos(config)?;
    let subscriber_country = load_subscriber_country(config)?;
    let comments = load_comments(config)?;
    let time_series = load_time_series(config)?;

    info!(
        videos = videos.len(),
        subscriber_rows = subscriber_country.len(),
        comments = comments.len(),
        time_series_rows = time_series.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Dataset loaded"
    );

    Ok(Dataset {
        videos,
        subscriber_country,
        comments,
        time_series,
    })
}

/// Loads the per-video file, newest first.
pub fn load_videos(config: &DataConfig) -> Result<Vec<VideoRecord>> {
    let table = CsvTable::read(&config.path_of(VIDEO_METRICS_FILE))?;

    if table.headers.len() != VIDEO_COLUMNS.len() {
        return Err(Error::ColumnCount {
            file: table.file.clone(),
            expected: VIDEO_COLUMNS.len(),
            found: table.headers.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut videos = Vec::with_capacity(table.rows.len().saturating_sub(1));

    // The first data row is the channel total.
    for record in table.rows.iter().skip(1) {
        let video_id = CsvTable::text(record, COL_VIDEO_ID);
        if !seen.insert(video_id.clone()) {
            return Err(Error::DuplicateVideo { video_id });
        }

        let published = table.cell(
            record,
            COL_PUBLISH_TIME,
            VIDEO_COLUMNS[COL_PUBLISH_TIME],
            |raw| parse::parse_date(raw, &config.publish_time_format),
        )?;

        let mut metrics = MetricValues::new();
        for (metric, position) in Metric::SOURCE {
            let value = if metric == Metric::AverageViewDuration {
                table.cell(record, position, VIDEO_COLUMNS[position], |raw| {
                    parse::parse_duration_secs(raw).map(f64::from)
                })?
            } else {
                table.cell(record, position, VIDEO_COLUMNS[position], parse::parse_number)?
            };
            metrics.set(metric, value);
        }

        let mut video = VideoRecord {
            video_id,
            title: CsvTable::text(record, COL_VIDEO_TITLE),
            published,
            metrics,
        };
        features::derive(&mut video, config.engagement_formula);
        videos.push(video);
    }

    features::sort_newest_first(&mut videos);
    Ok(videos)
}

pub fn load_subscriber_country(config: &DataConfig) -> Result<Vec<SubscriberCountryRecord>> {
    let table = CsvTable::read(&config.path_of(SUBSCRIBER_COUNTRY_FILE))?;

    let title_col = table.column(subscriber_columns::VIDEO_TITLE)?;
    let id_col = table.column(subscriber_columns::VIDEO_ID)?;
    let country_col = table.column(subscriber_columns::COUNTRY_CODE)?;
    let subscribed_col = table.column(subscriber_columns::IS_SUBSCRIBED)?;
    let views_col = table.column(subscriber_columns::VIEWS)?;

    table
        .rows
        .iter()
        .map(|record| -> Result<SubscriberCountryRecord> {
            Ok(SubscriberCountryRecord {
                video_title: CsvTable::text(record, title_col),
                video_id: CsvTable::text(record, id_col),
                country_code: CsvTable::text(record, country_col),
                is_subscribed: table.cell(
                    record,
                    subscribed_col,
                    subscriber_columns::IS_SUBSCRIBED,
                    parse::parse_flag,
                )?,
                views: table.cell(
                    record,
                    views_col,
                    subscriber_columns::VIEWS,
                    parse::parse_number,
                )?,
            })
        })
        .collect()
}

pub fn load_comments(config: &DataConfig) -> Result<Vec<CommentRecord>> {
    let table = CsvTable::read(&config.path_of(COMMENTS_FILE))?;

    let id_col = table.column(comment_columns::VIDEO_ID)?;
    let text_col = table.column(comment_columns::TEXT)?;

    Ok(table
        .rows
        .iter()
        .map(|record| CommentRecord {
            video_id: CsvTable::text(record, id_col),
            text: record.get(text_col).unwrap_or_default().to_string(),
        })
        .collect())
}

pub fn load_time_series(config: &DataConfig) -> Result<Vec<TimeSeriesRecord>> {
    let table = CsvTable::read(&config.path_of(TIME_SERIES_FILE))?;

    let date_col = table.column(time_series_columns::DATE)?;
    let id_col = table.column(time_series_columns::VIDEO_ID)?;
    let title_col = table.column(time_series_columns::VIDEO_TITLE)?;
    let views_col = table.column(time_series_columns::VIEWS)?;

    table
        .rows
        .iter()
        .map(|record| -> Result<TimeSeriesRecord> {
            Ok(TimeSeriesRecord {
                date: table.cell(record, date_col, time_series_columns::DATE, |raw| {
                    parse::parse_date(raw, &config.time_series_date_format)
                })?,
                video_id: CsvTable::text(record, id_col),
                video_title: CsvTable::text(record, title_col),
                views: table.cell(
                    record,
                    views_col,
                    time_series_columns::VIEWS,
                    parse::parse_number,
                )?,
            })
        })
        .collect()
}
