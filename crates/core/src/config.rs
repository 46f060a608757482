//! Data source configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};

/// Engagement ratio formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementFormula {
    /// `comments + shares + dislikes + likes / views`.
    ///
    /// Only the likes term is divided by views. Kept as the default so figures
    /// match the historical dashboard.
    #[default]
    Legacy,
    /// `(comments + shares + dislikes + likes) / views`.
    Corrected,
}

/// Where the CSV exports live and how their dates are written.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DataConfig {
    /// Directory holding the four CSV exports
    #[validate(length(min = 1))]
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    /// chrono format of the per-video publish time column
    #[validate(length(min = 1))]
    #[serde(default = "default_date_format")]
    pub publish_time_format: String,
    /// chrono format of the time-series Date column
    #[validate(length(min = 1))]
    #[serde(default = "default_date_format")]
    pub time_series_date_format: String,
    #[serde(default)]
    pub engagement_formula: EngagementFormula,
}

fn default_data_dir() -> String {
    "data/ken-jee-yt-data".to_string()
}

fn default_date_format() -> String {
    "%b %d, %Y".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            publish_time_format: default_date_format(),
            time_series_date_format: default_date_format(),
            engagement_formula: EngagementFormula::default(),
        }
    }
}

impl DataConfig {
    /// Config rooted at `data_dir`, defaults elsewhere.
    pub fn with_data_dir(data_dir: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn check(&self) -> Result<()> {
        self.validate()
            .map_err(|e| Error::config(format!("data: {}", e)))
    }

    /// Full path of a source file.
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        PathBuf::from(&self.data_dir).join(file_name)
    }
}
