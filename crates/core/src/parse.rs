//! Cell-level parsing: numbers, dates, durations, and flags.
//!
//! Each parser returns a plain reason string on failure; the loader wraps it
//! into [`crate::Error::Parse`] together with file, row, and column.

use chrono::{Datelike, NaiveDate};

/// Parses a numeric cell. Blank cells are missing values and become NaN.
///
/// Exports hold plain numbers; grouping or decimal commas are rejected.
pub fn parse_number(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed.parse::<f64>().map_err(|e| e.to_string())
}

/// Parses a date using exactly one chrono format.
///
/// chrono's `%Y` takes 1 to 4 digits, so a short year would land in the
/// first millennium; those are rejected.
pub fn parse_date(raw: &str, format: &str) -> Result<NaiveDate, String> {
    let date = NaiveDate::parse_from_str(raw.trim(), format)
        .map_err(|e| format!("expected format '{}': {}", format, e))?;
    if date.year() < 1000 {
        return Err(format!(
            "expected format '{}': year {} is not four digits",
            format,
            date.year()
        ));
    }
    Ok(date)
}

/// Parses `H:MM:SS` into whole seconds.
pub fn parse_duration_secs(raw: &str) -> Result<u32, String> {
    let parts: Vec<&str> = raw.trim().split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err("expected H:MM:SS".to_string());
    };

    let field = |s: &str, name: &str| -> Result<u32, String> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(format!("invalid {} component", name));
        }
        s.parse::<u32>()
            .map_err(|e| format!("invalid {} component: {}", name, e))
    };

    let hours = field(hours, "hours")?;
    let minutes = field(minutes, "minutes")?;
    let seconds = field(seconds, "seconds")?;

    if minutes >= 60 || seconds >= 60 {
        return Err("minutes and seconds must be below 60".to_string());
    }

    hours
        .checked_mul(3600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .ok_or_else(|| "duration overflows".to_string())
}

/// Parses a subscription flag.
pub fn parse_flag(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(format!("expected True or False, got '{}'", other)),
    }
}
