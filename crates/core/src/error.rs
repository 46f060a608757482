//! Unified error types for the dashboard.
//!
//! Error codes:
//! - DATA_001: Source file could not be read
//! - DATA_002: Source file does not match the expected schema
//! - DATA_003: A cell could not be parsed
//! - NOT_FOUND_001: Unknown video
//! - CONFIG_001: Invalid configuration
//! - INTERNAL_001: Internal error

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Data error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataErrorCode {
    /// DATA_001: I/O failure
    Io,
    /// DATA_002: Schema mismatch
    Schema,
    /// DATA_003: Unparseable value
    Parse,
}

impl DataErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io => "DATA_001",
            Self::Schema => "DATA_002",
            Self::Parse => "DATA_003",
        }
    }
}

/// Unified error type for the dashboard.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{file}: expected {expected} columns, found {found}")]
    ColumnCount {
        file: String,
        expected: usize,
        found: usize,
    },

    #[error("{file}: missing required column '{column}'")]
    MissingColumn { file: String, column: String },

    #[error("duplicate video identifier: {video_id}")]
    DuplicateVideo { video_id: String },

    #[error("{file} row {row}, column '{column}': cannot parse '{value}': {reason}")]
    Parse {
        file: String,
        row: usize,
        column: String,
        value: String,
        reason: String,
    },

    #[error("video not found: {0}")]
    VideoNotFound(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    pub fn missing_column(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            file: file.into(),
            column: column.into(),
        }
    }

    pub fn video_not_found(title: impl Into<String>) -> Self {
        Self::VideoNotFound(title.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::VideoNotFound(_) => 404,
            _ => 500,
        }
    }

    /// Get the stable error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => DataErrorCode::Io.code(),
            Self::Csv { .. } | Self::ColumnCount { .. } | Self::MissingColumn { .. } => {
                DataErrorCode::Schema.code()
            }
            Self::DuplicateVideo { .. } => DataErrorCode::Schema.code(),
            Self::Parse { .. } => DataErrorCode::Parse.code(),
            Self::VideoNotFound(_) => "NOT_FOUND_001",
            Self::Config(_) => "CONFIG_001",
            Self::Internal(_) => "INTERNAL_001",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = Error::ColumnCount {
            file: "Aggregated_Metrics_By_Video.csv".into(),
            expected: 19,
            found: 18,
        };
        assert_eq!(err.error_code(), "DATA_002");
        assert_eq!(err.http_status(), 500);
        assert_eq!(
            err.to_string(),
            "Aggregated_Metrics_By_Video.csv: expected 19 columns, found 18"
        );

        let err = Error::video_not_found("Missing");
        assert_eq!(err.error_code(), "NOT_FOUND_001");
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn test_io_error_names_path() {
        let err = Error::io(
            "data/missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.error_code(), "DATA_001");
        assert!(err.to_string().contains("data/missing.csv"));
    }
}
