use crate::error::{GitplyError, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate};
use std::path::{Path, PathBuf};

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Number of ISO weeks (52 or 53) in an ISO year. 28 December always falls in
/// the last week of its year.
pub fn weeks_in_year(iso_year: i32) -> u32 {
    NaiveDate::from_ymd_opt(iso_year, 12, 28)
        .map(|d| d.iso_week().week())
        .unwrap_or(52)
}

/// Resolve a `--since` argument against `today`.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DD`, or a relative duration in
/// humantime syntax (`90days`, `2weeks`, optionally followed by `ago`).
pub fn parse_since(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.date_naive());
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    let relative = input.strip_suffix("ago").unwrap_or(input).trim();
    let duration = humantime::parse_duration(relative)
        .map_err(|e| GitplyError::InvalidDate(format!("'{input}': {e}")))?;
    let days = i64::try_from(duration.as_secs() / 86_400)
        .map_err(|_| GitplyError::InvalidDate(format!("Duration overflow for '{input}'")))?;

    today
        .checked_sub_signed(Duration::days(days))
        .ok_or_else(|| GitplyError::InvalidDate(format!("Duration overflow for '{input}'")))
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(raw.as_ref()).into_owned())
}
